fn main() {

    // 1. Logging to stderr, filtered by JDFOAM_LOG
    jdfoam::init_tracing();

    // 2. Parse commandline arguments and run the requested command
    let success = match jdfoam::run_cli(jdfoam::args::parse_cli_args()) {
        Ok(success) => success,
        Err(err) => {
            eprintln!("{}", err);
            false
        },
    };

    // 3. A failed import or any error exits non-zero
    if !success {
        std::process::exit(1);
    }
}
