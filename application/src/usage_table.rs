use shared_http::api::UsageStats;

pub const API_KEY_HEADER: &str = "API Key";
pub const USAGE_COUNT_HEADER: &str = "Usage Count";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRow {
    pub api_key: String,
    pub count: String,
}

/// Rows of the dashboard table, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageTable {
    pub rows: Vec<UsageRow>,
}

impl UsageTable {
    pub fn headers(&self) -> [&'static str; 2] {
        [API_KEY_HEADER, USAGE_COUNT_HEADER]
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<&UsageStats> for UsageTable {
    fn from(stats: &UsageStats) -> Self {
        let rows = stats
            .entries()
            .map(|(api_key, count)| UsageRow {
                api_key: api_key.to_string(),
                count,
            })
            .collect();
        Self { rows }
    }
}
