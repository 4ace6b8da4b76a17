mod component;

pub use component::PlanOverride;
