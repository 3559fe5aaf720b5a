// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
     _                 _       _
 ___(_)_ __ ___  _   _| | __ _| |_ ___ _   _ _ __
/ __| | '_ ` _ \| | | | |/ _` | __/ _ \ | | | '__|
\__ \ | | | | | | |_| | | (_| | ||  __/ |_| | |
|___/_|_| |_| |_|\__,_|_|\__,_|\__\___|\__,_|_|

    Simulateur d'assurance auto
"#;
    println!("{}", banner);
}
