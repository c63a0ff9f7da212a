pub mod accumulate_pass;
pub mod composite_pass;

pub use accumulate_pass::AccumulatePass;
pub use composite_pass::CompositePass;
