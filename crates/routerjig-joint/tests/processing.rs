#[path = "processing/edit.rs"]
mod edit;
#[path = "processing/fit.rs"]
mod fit;
#[path = "processing/properties.rs"]
mod properties;
#[path = "processing/spacing.rs"]
mod spacing;
#[path = "processing/state.rs"]
mod state;
