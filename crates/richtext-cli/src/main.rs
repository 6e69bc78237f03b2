use anyhow::{Context, Result, bail};
use richtext_config::StyleConfig;
use richtext_engine::document::PLACEHOLDER;
use richtext_engine::{HandlerRegistry, RichDocument, Span, compile_markup};
use std::{env, path::PathBuf, process, sync::Arc};

struct Args {
    input: PathBuf,
    style: Option<PathBuf>,
    store: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut input = None;
    let mut style = None;
    let mut store = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--style" => style = Some(PathBuf::from(rest.next().context("--style needs a path")?)),
            "--store" => store = Some(PathBuf::from(rest.next().context("--store needs a path")?)),
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => bail!("unexpected argument '{other}'"),
        }
    }

    Ok(Args {
        input: input.context("no input file given")?,
        style,
        store,
    })
}

fn load_style(path: Option<&PathBuf>) -> Result<StyleConfig> {
    let Some(path) = path else {
        return Ok(match StyleConfig::load()? {
            Some(config) => {
                log::info!("Using style file {}", StyleConfig::config_path().display());
                config
            }
            None => {
                log::debug!("No style file found, using defaults");
                StyleConfig::default()
            }
        });
    };
    match StyleConfig::load_from_path(path)? {
        Some(config) => {
            log::info!("Using style file {}", path.display());
            Ok(config)
        }
        None => bail!("style file {} not found", path.display()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Usage: {} <input.html> [--style <style.toml>] [--store <out.rtd>]", args[0]);
            process::exit(1);
        }
    };

    let style = load_style(parsed.style.as_ref())?;
    let store = parsed.store.or_else(|| style.store_path.clone());

    let source = std::fs::read_to_string(&parsed.input)
        .with_context(|| format!("Failed to read {}", parsed.input.display()))?;
    let doc = compile_markup(&source, Arc::new(style), Arc::new(HandlerRegistry::standard()));
    log::info!(
        "Compiled {} into {} fragment(s) with {} span(s)",
        parsed.input.display(),
        doc.len(),
        doc.span_count()
    );
    print_document(&doc);

    if let Some(store) = store {
        doc.save_to_path(&store)
            .with_context(|| format!("Failed to write {}", store.display()))?;
        let reloaded = RichDocument::load_from_path(&store)?;
        log::info!(
            "Stored {} ({} of {} span(s) restored)",
            store.display(),
            reloaded.span_count(),
            doc.span_count()
        );
    }

    Ok(())
}

fn print_document(doc: &RichDocument) {
    for (i, fragment) in doc.fragments().iter().enumerate() {
        println!("--- fragment {i} ---");
        println!("{}", fragment.text.replace(PLACEHOLDER, "[obj]"));
        for annotation in &fragment.annotations {
            println!(
                "  {}..{} {}",
                annotation.range.start,
                annotation.range.end,
                describe(&annotation.span)
            );
        }
    }
}

fn describe(span: &Span) -> String {
    match span {
        Span::Style(style) => format!("{style:?}"),
        Span::Link(link) => format!("link -> {}", link.url),
        Span::UrlBitmap(image) => match image.layout_size() {
            Some((width, height)) => format!("image {} ({width}x{height})", image.uri),
            None => format!("image {} (auto size)", image.uri),
        },
        Span::Video(video) => format!("video {}", video.uri),
        Span::Heading(level) => format!("h{level}"),
        Span::Bullet(bullet) => format!("bullet {} (depth {})", bullet.marker(), bullet.depth),
        other => format!("{:?}", other.kind()),
    }
}
