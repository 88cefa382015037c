pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("forumweb")
        .about("Multi-factor device-binding authentication for ForumWeb")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("FORUMWEB_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("accounts-path")
                .short('a')
                .long("accounts-path")
                .help("Path to the account collection JSON file")
                .long_help(
                    "Path to the flat JSON file holding the account collection. A missing file reads as an empty collection and is created on first registration.",
                )
                .default_value("users.json")
                .env("FORUMWEB_ACCOUNTS_PATH"),
        )
        .arg(
            Arg::new("frontend-origin")
                .long("frontend-origin")
                .help("Exact origin allowed by CORS (any origin when unset)")
                .env("FORUMWEB_FRONTEND_ORIGIN"),
        );

    logging::with_args(command)
}
