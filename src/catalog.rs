// Static filter catalog. The `value` tokens are what the listing endpoint
// understands and must stay byte-for-byte as they are.

use once_cell::sync::Lazy;
use serde::Serialize;

const FIRST_YEAR: u16 = 1980;
const LAST_YEAR: u16 = 2025;

/// Whether a group accepts one option or a set of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionMode {
    Single,
    Multi,
}

/// One selectable entry in a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub display_name: String,
    pub value: String,
}

impl FilterOption {
    fn new(display_name: impl Into<String>, value: impl Into<String>) -> Self {
        FilterOption {
            display_name: display_name.into(),
            value: value.into(),
        }
    }
}

/// A dropdown in the filter panel.
#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub filter_name: &'static str,
    pub id: &'static str,
    pub mode: SelectionMode,
    pub options: Vec<FilterOption>,
}

impl FilterGroup {
    pub fn option_by_value(&self, value: &str) -> Option<&FilterOption> {
        self.options.iter().find(|o| o.value == value)
    }

    pub fn option_by_name(&self, display_name: &str) -> Option<&FilterOption> {
        self.options.iter().find(|o| o.display_name == display_name)
    }
}

fn group(
    filter_name: &'static str,
    id: &'static str,
    mode: SelectionMode,
    options: &[(&str, &str)],
) -> FilterGroup {
    FilterGroup {
        filter_name,
        id,
        mode,
        options: options
            .iter()
            .map(|(name, value)| FilterOption::new(*name, *value))
            .collect(),
    }
}

static CATALOG: Lazy<Vec<FilterGroup>> = Lazy::new(|| {
    use SelectionMode::*;

    vec![
        group(
            "Type",
            "type",
            Multi,
            &[
                ("Movie", "Movie"),
                ("Music", "Music"),
                ("ONA", "ONA"),
                ("OVA", "OVA"),
                ("Special", "Special"),
                ("TV", "TV"),
            ],
        ),
        group(
            "Genres",
            "genres",
            Multi,
            &[
                ("Action", "1"),
                ("Adventure", "2"),
                ("Cars", "538"),
                ("Comedy", "8"),
                ("Dementia", "453"),
                ("Demons", "119"),
                ("Drama", "62"),
                ("Ecchi", "214"),
                ("Fantasy", "3"),
                ("Game", "180"),
                ("Harem", "215"),
                ("Historical", "70"),
                ("Horror", "222"),
                ("Isekai", "74"),
                ("Josei", "404"),
                ("Kids", "46"),
                ("Magic", "203"),
                ("Martial Arts", "114"),
                ("Mecha", "123"),
                ("Military", "125"),
                ("Music", "242"),
                ("Mystery", "57"),
                ("Parody", "162"),
                ("Police", "136"),
                ("Psychological", "73"),
                ("Romance", "28"),
                ("Samurai", "163"),
                ("School", "14"),
                ("Sci-Fi", "12"),
                ("Seinen", "50"),
                ("Shoujo", "252"),
                ("Shoujo Ai", "235"),
                ("Shounen", "15"),
                ("Shounen Ai", "233"),
                ("Slice of Life", "35"),
                ("Space", "124"),
                ("Sports", "29"),
                ("Super Power", "16"),
                ("Supernatural", "9"),
                ("Thriller", "54"),
                ("unknown", "32"),
                ("Vampire", "58"),
            ],
        ),
        FilterGroup {
            filter_name: "Year",
            id: "year",
            mode: Multi,
            // Newest first.
            options: (FIRST_YEAR..=LAST_YEAR)
                .rev()
                .map(|year| FilterOption::new(year.to_string(), year.to_string()))
                .collect(),
        },
        group(
            "Rating",
            "rating",
            Multi,
            &[
                ("G - All Ages", "g"),
                ("PG - Children", "pg"),
                ("PG 13 - Teens", "pg_13"),
                ("R - 17+", "r"),
                ("R+ - Mild Nudity", "r+"),
                ("Rx - Hentai", "rx"),
            ],
        ),
        group(
            "Status",
            "status",
            Multi,
            &[
                ("Finished Airing", "finished-airing"),
                ("Currently Airing", "currently-airing"),
                ("Not Yet Aired", "not-yet-aired"),
            ],
        ),
        group(
            "Season",
            "season",
            Multi,
            &[
                ("Spring", "spring"),
                ("Summer", "summer"),
                ("Fall", "fall"),
                ("Winter", "winter"),
            ],
        ),
        group(
            "Language",
            "language",
            Multi,
            &[("Sub", "sub"), ("Dub", "dub")],
        ),
        group(
            "Default",
            "sort",
            Single,
            &[
                ("Default", "default"),
                ("Latest Updated", "latest-updated"),
                ("Score", "score"),
                ("Name A-Z", "name-az"),
                ("Release Date", "release-date"),
                ("Most Viewed", "most-viewed"),
            ],
        ),
    ]
});

/// The full catalog in display order.
pub fn catalog() -> &'static [FilterGroup] {
    &CATALOG
}

pub fn find_group(id: &str) -> Option<&'static FilterGroup> {
    CATALOG.iter().find(|g| g.id == id)
}

/// Wire parameter for a group id. Ids without an entry never reach the query.
pub fn wire_param(group_id: &str) -> Option<&'static str> {
    let param = match group_id {
        "type" => "term_type[]",
        "genres" => "genre[]",
        "country" => "country",
        "sort" => "sort",
        "year" => "year",
        "rating" => "rating",
        "status" => "status",
        "season" => "season",
        "language" => "language",
        _ => return None,
    };
    Some(param)
}
