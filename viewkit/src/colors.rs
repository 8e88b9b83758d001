//! Terminal colors that switch off when stderr isn't a terminal.
use crate::config::get_config;
use colored::{ColoredString, Colorize};

pub trait MaybeColorize {
    fn green(&self) -> String;
    fn red(&self) -> String;
    fn purple(&self) -> String;
    fn yellow(&self) -> String;
    fn cyan(&self) -> String;
}

fn paint(text: &str, color: fn(&str) -> ColoredString) -> String {
    if get_config().general.tty {
        color(text).to_string()
    } else {
        text.to_string()
    }
}

impl MaybeColorize for &str {
    fn green(&self) -> String {
        paint(self, |s| Colorize::green(s))
    }

    fn red(&self) -> String {
        paint(self, |s| Colorize::red(s))
    }

    fn purple(&self) -> String {
        paint(self, |s| Colorize::purple(s))
    }

    fn yellow(&self) -> String {
        paint(self, |s| Colorize::yellow(s))
    }

    fn cyan(&self) -> String {
        paint(self, |s| Colorize::cyan(s))
    }
}

impl MaybeColorize for String {
    fn green(&self) -> String {
        MaybeColorize::green(&self.as_str())
    }

    fn red(&self) -> String {
        MaybeColorize::red(&self.as_str())
    }

    fn purple(&self) -> String {
        MaybeColorize::purple(&self.as_str())
    }

    fn yellow(&self) -> String {
        MaybeColorize::yellow(&self.as_str())
    }

    fn cyan(&self) -> String {
        MaybeColorize::cyan(&self.as_str())
    }
}
