/// Number of months in every BS year
pub const MONTHS_PER_YEAR: usize = 12;

/// Month number for Baisakh, the first BS month
pub const BAISAKH: u8 = 1;
/// Month number for Chaitra, the last BS month
pub const CHAITRA: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Longest month any BS year can have. Table rows are rejected above this.
pub const MAX_MONTH_DAYS: u8 = 32;

/// Romanised month names, index 0 is Baisakh
pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Baisakh", "Jestha", "Asar", "Shrawan", "Bhadra", "Aswin", "Kartik", "Mangsir", "Poush", "Magh",
    "Falgun", "Chaitra",
];

/// Month names in Devanagari, index 0 is बैशाख
pub const MONTH_NAMES_NEPALI: [&str; MONTHS_PER_YEAR] = [
    "बैशाख",
    "जेठ",
    "असार",
    "साउन",
    "भदौ",
    "असोज",
    "कात्तिक",
    "मंसिर",
    "पुस",
    "माघ",
    "फागुन",
    "चैत",
];

/// Devanagari digits, indexed by value
pub const NEPALI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

/// Date component separator (`YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (`START/END`)
pub const RANGE_SEPARATOR: char = '/';

/// IANA zone every AD input is normalised to before conversion
pub const NEPAL_TZ: chrono_tz::Tz = chrono_tz::Asia::Kathmandu;

/// AD half of the anchor pair: 2000-01-01
pub const ANCHOR_AD: (i32, u32, u32) = (2000, 1, 1);
/// BS half of the anchor pair: 2056-09-17 (17 Poush 2056)
pub const ANCHOR_BS: (u16, u8, u8) = (2056, 9, 17);

/// First BS year covered by [`BS_MONTH_DAYS`]
pub const BS_TABLE_FIRST_YEAR: u16 = 2056;

/// Days in each month (Baisakh..Chaitra) for every BS year from
/// [`BS_TABLE_FIRST_YEAR`] onward. Extending coverage means appending rows.
pub static BS_MONTH_DAYS: [[u8; MONTHS_PER_YEAR]; 35] = [
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2056
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2057
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2058
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2059
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2060
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2061
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2062
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2063
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2064
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2065
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2066
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2067
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2068
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2069
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2070
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2071
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2072
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2073
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2074
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2075
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2076
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2077
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2078
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2079
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2080
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2081
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2082
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2083
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2084
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2085
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2086
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2087
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2088
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2089
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2090
];
