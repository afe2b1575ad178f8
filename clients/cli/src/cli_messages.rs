//! CLI command messaging
//!
//! Colored, tagged one-line messages for the subcommands that run outside the
//! dashboard (`catalog`, `snapshot`, `reset-config`).

#[derive(Debug, Clone, Copy)]
enum Tag {
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Info => "\x1b[1;33m[INFO]\x1b[0m",
            Tag::Warn => "\x1b[1;91m[WARN]\x1b[0m",
            Tag::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            Tag::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

fn print_tagged(tag: Tag, title: &str, details: &str) {
    if details.is_empty() {
        println!("{} {}", tag.label(), title);
    } else {
        println!("{} {}\t {}", tag.label(), title, details);
    }
}

pub fn print_info(title: &str, details: &str) {
    print_tagged(Tag::Info, title, details);
}

pub fn print_warn(title: &str, details: &str) {
    print_tagged(Tag::Warn, title, details);
}

/// Errors go to stderr, details on their own line.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{} {}", Tag::Error.label(), title);
    if let Some(details) = details {
        eprintln!("{} Details: {}", Tag::Error.label(), details);
    }
}

pub fn print_success(title: &str, details: &str) {
    print_tagged(Tag::Success, title, details);
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
