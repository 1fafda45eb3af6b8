pub mod detail_panel;
pub mod entry_list;
pub mod file_picker;
pub mod filter_bar;
pub mod theme;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_panel::{DetailContent, DetailPanel, DetailPanelProps};
pub use entry_list::{EntryList, EntryListProps, Placeholder};
pub use file_picker::{FilePicker, FilePickerProps};
pub use filter_bar::{FilterBar, FilterBarProps};
