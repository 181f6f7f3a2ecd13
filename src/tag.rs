// MIT License
// Copyright (c) 2024 Graham King

pub const TAG_COUNT: usize = 11;

/// The fixed tag vocabulary. Each one is a column in the messages table,
/// in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Motivational,
    Inspirational,
    Funny,
    Quote,
    Philosophical,
    DailyAffirmation,
    HarshTruth,
    Workplace,
    PersonalGrowth,
    Existential,
    Complimentary,
}

impl Tag {
    pub const ALL: [Tag; TAG_COUNT] = [
        Tag::Motivational,
        Tag::Inspirational,
        Tag::Funny,
        Tag::Quote,
        Tag::Philosophical,
        Tag::DailyAffirmation,
        Tag::HarshTruth,
        Tag::Workplace,
        Tag::PersonalGrowth,
        Tag::Existential,
        Tag::Complimentary,
    ];

    pub fn column(self) -> &'static str {
        use Tag::*;
        match self {
            Motivational => "motivational",
            Inspirational => "inspirational",
            Funny => "funny",
            Quote => "quote",
            Philosophical => "philosophical",
            DailyAffirmation => "daily_affirmation",
            HarshTruth => "harsh_truth",
            Workplace => "workplace",
            PersonalGrowth => "personal_growth",
            Existential => "existential",
            Complimentary => "complimentary",
        }
    }

    // Exact match on the column name, tags in the yaml are free-form
    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|t| t.column() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which of the fixed tags a message has
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagSet([bool; TAG_COUNT]);

impl TagSet {
    /// Unknown names are dropped
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> TagSet {
        let mut set = TagSet::default();
        for tag in names.into_iter().filter_map(Tag::from_name) {
            set.0[tag.index()] = true;
        }
        set
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.0[tag.index()]
    }

    /// 0 or 1 for every column, in column order
    pub fn values(&self) -> [i64; TAG_COUNT] {
        self.0.map(i64::from)
    }
}
