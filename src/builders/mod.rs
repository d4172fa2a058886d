pub mod cloth_builder;
