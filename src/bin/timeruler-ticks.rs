//! CLI utility that prints the ruler layout for a zoom/scroll state as JSON.

use timeruler::config;
use timeruler::timeline::{LabelWindow, ScrollbarReport, TickLayout, TimeScale};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let Some(options) = parse_args(std::env::args().skip(1).collect(), Options::from(&settings))?
    else {
        return Ok(());
    };

    let settings = options.apply_to(settings);
    let scroll = non_negative(options.scroll);
    let viewport = non_negative(options.viewport);

    let scale = TimeScale::new(settings.scale, settings.tick_pixels, settings.duration_seconds);
    let layout = TickLayout::build(&scale, settings.min_ruler_width);
    let window = LabelWindow::around(scroll, viewport, layout.width());
    let labels = layout
        .labels_in(window, settings.frame_rate)
        .into_iter()
        .map(|label| serde_json::json!({ "index": label.index, "x": label.x, "text": label.text }))
        .collect::<Vec<_>>();
    let report = ScrollbarReport::compute(scroll, viewport, scale.timeline_width(0.0));

    let output = serde_json::json!({
        "pixels_per_second": scale.pixels_per_second(),
        "render_width": layout.width(),
        "tick_spacing": layout.spacing(),
        "tick_count": layout.len(),
        "label_window": [window.start, window.end],
        "labels": labels,
        "scrollbar": report,
    });
    let text = serde_json::to_string_pretty(&output)
        .map_err(|err| format!("Failed to encode layout: {err}"))?;
    println!("{text}");
    Ok(())
}

const FLAGS: &[&str] = &[
    "--scale",
    "--tick-pixels",
    "--duration",
    "--min-width",
    "--scroll",
    "--viewport",
];

struct Options {
    scale: f64,
    tick_pixels: f32,
    duration: f64,
    min_width: f32,
    scroll: f32,
    viewport: f32,
}

impl From<&config::RulerSettings> for Options {
    fn from(settings: &config::RulerSettings) -> Self {
        Self {
            scale: settings.scale,
            tick_pixels: settings.tick_pixels,
            duration: settings.duration_seconds,
            min_width: settings.min_ruler_width,
            scroll: 0.0,
            viewport: 800.0,
        }
    }
}

impl Options {
    /// Fold the layout flags into `settings`, clamped like a loaded config.
    fn apply_to(&self, settings: config::RulerSettings) -> config::RulerSettings {
        config::RulerSettings {
            scale: self.scale,
            tick_pixels: self.tick_pixels,
            duration_seconds: self.duration,
            min_ruler_width: self.min_width,
            ..settings
        }
        .normalized()
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn parse_args(args: Vec<String>, mut options: Options) -> Result<Option<Options>, String> {
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        if matches!(flag, "-h" | "--help") {
            println!("{}", help_text());
            return Ok(None);
        }
        if !FLAGS.contains(&flag) {
            return Err(format!("Unknown argument: {flag}\n\n{}", help_text()));
        }
        idx += 1;
        let value = args
            .get(idx)
            .ok_or_else(|| format!("{flag} requires a value"))?;
        match flag {
            "--scale" => options.scale = parse_number(flag, value)?,
            "--tick-pixels" => options.tick_pixels = parse_number(flag, value)?,
            "--duration" => options.duration = parse_number(flag, value)?,
            "--min-width" => options.min_width = parse_number(flag, value)?,
            "--scroll" => options.scroll = parse_number(flag, value)?,
            "--viewport" => options.viewport = parse_number(flag, value)?,
            _ => unreachable!("flag list and match arms disagree"),
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{flag} expects a number, got {value:?}"))
}

fn help_text() -> String {
    [
        "timeruler-ticks",
        "",
        "Prints the ruler tick layout, visible labels and scrollbar report as JSON.",
        "Defaults come from the saved settings.",
        "",
        "Options:",
        "  --scale <s>         Seconds per long tick.",
        "  --tick-pixels <px>  Width of one long-tick interval.",
        "  --duration <s>      Project duration.",
        "  --min-width <px>    Minimum ruler width.",
        "  --scroll <px>       Horizontal scroll offset.",
        "  --viewport <px>     Visible track area width.",
    ]
    .join("\n")
}
