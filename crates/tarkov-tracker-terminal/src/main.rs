mod commands;

fn main() {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",     "Show help");
		opts.optopt(  "d", "dataset",  "Dataset file to read instead of the one in the data directory", "PATH");
		opts.optopt(  "p", "progress", "Progress file to use instead of the one in the data directory", "PATH");
		opts.optflag( "a", "all",      "Include completed nodes when listing needed items");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") || parsed_options.free.is_empty() {
			eprintln!("{}", opts.usage(USAGE));
			return;
		}

		parsed_options
	};

	let config = tarkov_tracker::TrackerConfig::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		tarkov_tracker::TrackerConfig::default()
	});

	let dataset_path = parsed_options.opt_str("d").map(std::path::PathBuf::from).unwrap_or_else(|| config.dataset_path());
	let progress_path = parsed_options.opt_str("p").map(std::path::PathBuf::from).unwrap_or_else(|| config.progress_path());

	let mut session = match commands::Session::open(&config, &dataset_path, progress_path) {
		Ok(s) => s,
		Err(e) => {
			log::error!("Failed to open dataset {}: {}", dataset_path.display(), e);
			return;
		},
	};
	if parsed_options.opt_present("a") {
		session.set_scope(tarkov_tracker::ScopeMode::IncludeCompleted);
	}

	let stdout = std::io::stdout();
	if let Err(e) = session.run(&parsed_options.free, &mut stdout.lock()) {
		log::error!("{}", e);
		std::process::exit(1);
	}
}

const USAGE: &str = "Usage: tarkov-tracker-terminal [options] <command>

Commands:
	status                Show progress and what can be done right now
	path <id>             List what has to be completed to reach <id>
	needs                 List needed items by priority
	clusters              Suggest objectives to do in the same raid
	complete <id>         Mark <id> completed
	complete-chain <id>   Mark <id> and everything before it completed
	uncomplete <id>       Mark <id> not completed
	level <n>             Set the player level
	export                Print every node status as JSON";
