pub mod controls;
pub mod dialogs;
pub mod force_graph;
pub mod session;
