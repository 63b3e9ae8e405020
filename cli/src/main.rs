use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use blockpad::descriptor::BlockDescriptor;
use editor::workspace::{DragPayload, DropTarget, Workspace};
use editor::{catalog, palette};

#[derive(Parser)]
#[command(name = "blockpad", version, about = "Block program editor toolkit")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate target code from a saved block program
    Render(RenderArgs),

    /// Inspect a module catalog file
    Catalog(CatalogArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// JSON file holding the program's top-level block descriptors
    file: String,

    /// Rebuild only, don't print code (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the rebuilt program tree
    #[arg(long)]
    ast: bool,
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// TOML catalog file listing modules, functions, and variables
    file: String,

    /// Validate only, don't print the palette (exit 0 if valid)
    #[arg(long)]
    check: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => do_render(args),
        Command::Catalog(args) => do_catalog(args, cli.no_color),
    }
}

fn do_render(args: RenderArgs) {
    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let descriptors: Vec<BlockDescriptor> = match serde_json::from_str(&source) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    // Replay each saved root through the regular pick/drop protocol.
    let mut workspace = Workspace::new();
    for descriptor in descriptors {
        workspace.pick(DragPayload::NewBlock(descriptor));
        if let Err(e) = workspace.drop_on(DropTarget::Root) {
            let prefix = if e.is_fatal() { "fatal" } else { "error" };
            eprintln!("{}: '{}': {}", prefix, args.file, e);
            process::exit(1);
        }
    }

    if args.check {
        eprintln!(
            "ok: {} rebuilt ({} top-level blocks)",
            args.file,
            workspace.program().blocks.len()
        );
        return;
    }

    if args.ast {
        println!("{:#?}", workspace.program());
        return;
    }

    print!("{}", workspace.generate());
}

fn do_catalog(args: CatalogArgs, no_color: bool) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let catalog = match catalog::parse(&source) {
        Ok(c) => c,
        Err(error) => {
            let writer = StandardStream::stderr(color_choice);
            let config = term::Config::default();
            let diagnostic = error.to_diagnostic(file_id);
            let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
            process::exit(1);
        }
    };

    if args.check {
        eprintln!(
            "ok: {} parsed successfully ({} modules)",
            args.file,
            catalog.modules.len()
        );
        return;
    }

    for group in palette::build(&catalog) {
        println!("{}", group.name);
        for block in &group.blocks {
            println!("  {}", palette::label(block));
        }
    }
}
