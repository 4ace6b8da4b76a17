mod component;

pub use component::UsageTableView;
