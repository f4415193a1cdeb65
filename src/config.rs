use clap::{App, Arg};

#[derive(Debug, PartialEq)]
pub struct Config {
    pub image_path: String,
}

impl Config {
    /// Parses a single positional image-file argument. `args` is typically
    /// `std::env::args()`; a missing argument makes `clap` print usage to
    /// stderr and exit non-zero.
    pub fn parse<I, T>(args: I) -> Config
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = App::new("LC-3 VM")
            .about("Runs an LC-3 object file")
            .arg(
                Arg::with_name("IMAGE")
                    .help("Path to the LC-3 object file to load and run")
                    .required(true)
                    .index(1),
            )
            .get_matches_from(args);

        Config {
            image_path: matches.value_of("IMAGE").unwrap().to_string(),
        }
    }
}
