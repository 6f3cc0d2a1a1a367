use clap::{arg,crate_version,Command,ArgAction};
use huffpress::{huff,HeaderFormat,Options,STD_OPTIONS};
use huffpress::huff::{HuffProcessor,Outcome};
use std::io::{Seek,SeekFrom};
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const RCH: &str = "unreachable was reached";

fn ok_to_overwrite(path_out: &str) -> bool {
    if let Ok(_f) = std::fs::File::open(path_out) {
        let mut ans = String::new();
        eprint!("{} exists, overwrite? (y/n) ",path_out);
        std::io::stdin().read_line(&mut ans).expect("could not read stdin");
        if ans.trim_end()=="y" || ans.trim_end()=="Y" {
            return true;
        }
        return false;
    }
    true
}

fn header_format(name: &str) -> HeaderFormat {
    match name {
        "counts" => HeaderFormat::StoreCounts,
        _ => HeaderFormat::StoreTree
    }
}

fn main() -> STDRESULT
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"Examples:
---------
Compress:      `huffpress compress -f tree -i my_expanded -o my_compressed`
Expand:        `huffpress expand -i my_compressed -o my_expanded`
Statistics:    `huffpress stats -f counts -i my_expanded`";

    let formats = ["counts","tree"];

    let mut main_cmd = Command::new("huffpress")
        .about("Compress and expand with static Huffman codes")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-f --format <FORMAT> "header format").value_parser(formats)
            .default_value("tree"))
        .arg(arg!(--force "write output even if it is larger than the input").action(ArgAction::SetTrue))
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("expand a file"));

    main_cmd = main_cmd.subcommand(Command::new("stats")
        .arg(arg!(-f --format <FORMAT> "header format").value_parser(formats)
            .default_value("tree"))
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .about("show how many bits compression would save"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let opt = Options {
            format: header_format(cmd.get_one::<String>("format").expect(RCH)),
            force: cmd.get_flag("force"),
            ..STD_OPTIONS
        };
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let mut processor = HuffProcessor::with_options(&opt);
        let mut in_file = std::fs::File::open(path_in)?;
        processor.plan(&mut in_file,opt.format)?;
        in_file.seek(SeekFrom::Start(0))?;
        // compress into memory first, so that a refusal leaves no file behind
        let mut compressed: Vec<u8> = Vec::new();
        match processor.compress(&mut in_file,&mut compressed,opt.force)? {
            Outcome::Written { .. } => {
                std::fs::write(path_out,&compressed)?;
                let in_size = processor.stats().map(|s| s.bits_before / 8).unwrap_or(0);
                eprintln!("compressed {} into {}",in_size,compressed.len());
            },
            Outcome::Refused { .. } => {
                eprintln!("no output written");
            }
        }
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        if !ok_to_overwrite(path_out) {
            eprintln!("abort operation");
            return Ok(());
        }
        let mut in_file = std::fs::File::open(path_in)?;
        // expand into memory first, a bad stream should not leave a file behind
        let mut expanded = std::io::Cursor::new(Vec::new());
        let (in_size,out_size) = huff::expand(&mut in_file,&mut expanded)?;
        std::fs::write(path_out,expanded.into_inner())?;
        eprintln!("expanded {} into {}",in_size,out_size);
    }

    if let Some(cmd) = matches.subcommand_matches("stats") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let format = header_format(cmd.get_one::<String>("format").expect(RCH));
        let mut processor = HuffProcessor::new();
        let mut in_file = std::fs::File::open(path_in)?;
        processor.plan(&mut in_file,format)?;
        if let Some(stats) = processor.stats() {
            println!("bits before: {}",stats.bits_before);
            println!("bits after:  {}",stats.bits_after);
            println!("bits saved:  {}",stats.bits_saved);
        }
    }

    Ok(())
}
