/// UI widgets for FolderTally.

pub mod status_bar;
pub mod tally_display;
pub mod toolbar;
