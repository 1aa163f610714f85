pub mod iteration_rule;
pub mod palettes;
