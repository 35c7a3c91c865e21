pub mod missing_dirs;
