pub mod emoji_dataset;
