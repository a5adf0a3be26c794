/// Directory names, relative to the project root
pub const RAW_DIR: &str = "data/raw";
pub const PROCESSED_DIR: &str = "data/processed";

/// Raw input file names
pub const DELHI_NCR_FILE: &str = "delhi_ncr_aqi.csv";
pub const DELHI_NCR_FALLBACK_FILE: &str = "delhi_ncr_aqi_dataset.csv";
pub const CITY_DAY_FILE: &str = "city_day.csv";
pub const INDIA_VARIOS_FILE: &str = "india_varios.csv";
pub const MAJOR_CITY_FILE: &str = "major_city.csv";
pub const INDIA_DATASET_FILE: &str = "India_dataset.csv";
pub const PROCESSED_AQI_FILE: &str = "processed_aqi_data.csv";
pub const BOUNDARY_FILE: &str = "india_states.geojson";

/// Processed output file names
pub const DELHI_NCR_OUTPUT: &str = "delhi_ncr_aqi_2020_2024_clean.csv";
pub const CITY_DAY_OUTPUT: &str = "city_day_clean.csv";
pub const CITY_CHANGE_OUTPUT: &str = "covid_city_aqi_change_2015_2020.csv";
pub const PM25_SNAPSHOT_OUTPUT: &str = "india_pm25_snapshot_clean.csv";
pub const MAJOR_CITY_OUTPUT: &str = "major_city_clean.csv";
pub const INDIA_HISTORICAL_OUTPUT: &str = "india_historical_clean.csv";
pub const PROCESSED_AQI_OUTPUT: &str = "processed_aqi_data_clean.csv";

/// Delhi-NCR year window (inclusive)
pub const DELHI_MIN_YEAR: i32 = 2020;
pub const DELHI_MAX_YEAR: i32 = 2024;

/// Baseline and lockdown windows for the city AQI change summary (inclusive)
pub const BASELINE_START: (i32, u32, u32) = (2015, 1, 1);
pub const BASELINE_END: (i32, u32, u32) = (2019, 12, 31);
pub const EVENT_START: (i32, u32, u32) = (2020, 3, 1);
pub const EVENT_END: (i32, u32, u32) = (2020, 5, 31);

/// Measurement columns in the city-day and major-city feeds
pub const CITY_MEASUREMENT_COLUMNS: [&str; 8] =
    ["PM2.5", "PM10", "NO", "NO2", "CO", "SO2", "O3", "AQI"];

pub const DELHI_NUMERIC_COLUMNS: [&str; 13] = [
    "pm25",
    "pm10",
    "no2",
    "so2",
    "co",
    "o3",
    "latitude",
    "longitude",
    "aqi",
    "temperature",
    "humidity",
    "wind_speed",
    "visibility",
];

pub const HISTORICAL_POLLUTANT_COLUMNS: [&str; 5] = ["so2", "no2", "rspm", "spm", "pm2_5"];

pub const PROCESSED_AQI_NUMERIC_COLUMNS: [&str; 11] = [
    "pm25", "pm10", "co", "no2", "o3", "so2", "aqi", "hour", "day", "month", "year",
];

/// Cell values read as missing in every dataset
pub const DEFAULT_NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Extra missing-value tokens for the historical India dataset
pub const HISTORICAL_NA_TOKENS: [&str; 3] = ["NA", "N/A", ""];

/// Substring identifying PM2.5 rows in the snapshot dataset
pub const PM25_POLLUTANT_MARKER: &str = "PM2";

pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
