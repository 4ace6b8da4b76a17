pub mod header;
pub mod plan_override;
pub mod usage_table;
