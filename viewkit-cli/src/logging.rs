use viewkit::colors::MaybeColorize;

pub fn view(engine: &str, name: &str) {
    println!("{:<12} {}", engine.cyan(), name);
}

pub fn error(something: impl ToString) {
    eprintln!("{}: {}", "error".red(), something.to_string());
}

pub fn warning(something: impl ToString) {
    eprintln!("{}: {}", "warning".yellow(), something.to_string());
}
