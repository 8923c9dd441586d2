use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use radiowall::{
    button::ButtonDecoder,
    touch::{GestureEngine, GestureEvent, TouchPhase, TouchSample},
    ui::{UiMode, UiState},
};

/// Control-loop period of the firmware.
const TICK_MS: u64 = 5;
/// Idle time replayed after the last record so pending decisions resolve.
const TAIL_MS: u64 = 1_000;

#[derive(Clone, Copy)]
enum ReplayInput {
    Touch(TouchSample),
    NoSample,
    Button { pressed: bool },
    Mode(UiMode),
}

#[derive(Clone, Copy)]
struct ReplayRecord {
    ms: u64,
    input: ReplayInput,
}

struct Replay {
    engine: GestureEngine,
    button: ButtonDecoder,
    ui: UiState,
    button_pressed: bool,
    next_idle_ms: u64,
    lines: Vec<String>,
}

impl Replay {
    fn new(start_ms: u64) -> Self {
        Self {
            engine: GestureEngine::default(),
            button: ButtonDecoder::default(),
            ui: UiState::new(),
            button_pressed: false,
            next_idle_ms: start_ms,
            lines: Vec::new(),
        }
    }

    fn advance_to(&mut self, target_ms: u64) {
        while self.next_idle_ms < target_ms {
            self.step(self.next_idle_ms, None);
            self.next_idle_ms += TICK_MS;
        }
    }

    fn apply(&mut self, record: ReplayRecord) {
        self.advance_to(record.ms);
        match record.input {
            ReplayInput::Touch(sample) => self.sample_at(record.ms, Some(sample)),
            ReplayInput::NoSample => self.sample_at(record.ms, None),
            ReplayInput::Button { pressed } => self.button_pressed = pressed,
            ReplayInput::Mode(mode) => self.ui.set_mode(mode),
        }
    }

    fn sample_at(&mut self, now_ms: u64, sample: Option<TouchSample>) {
        self.step(now_ms, sample);
        self.next_idle_ms = self.next_idle_ms.max(now_ms + TICK_MS);
    }

    fn step(&mut self, now_ms: u64, sample: Option<TouchSample>) {
        let output = self.engine.tick(now_ms, sample, &self.ui);
        for event in output.iter() {
            self.lines.push(format!("{now_ms} touch {}", gesture_fields(&event)));
            self.ui.apply_gesture(&event);
        }

        let output = self.button.tick(now_ms, self.button_pressed);
        for event in output.iter() {
            self.lines.push(format!("{now_ms} button {}", event.label()));
            self.ui.apply_button(event);
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let records = parse_trace(&trace_path)?;
    let lines = replay_records(&records)
        .ok_or_else(|| format!("{} has no records", trace_path.display()))?;

    for line in &lines {
        println!("{line}");
    }

    if let Some(expect_path) = expect_path {
        let expected = parse_expected(&expect_path)?;
        if lines != expected {
            eprintln!("expected events:");
            for line in &expected {
                eprintln!("  {line}");
            }
            eprintln!("actual events:");
            for line in &lines {
                eprintln!("  {line}");
            }
            return Err("event sequence mismatch".into());
        }
    }

    Ok(())
}

/// Runs the whole trace plus the idle tail. `None` for an empty trace.
fn replay_records(records: &[ReplayRecord]) -> Option<Vec<String>> {
    let (first, last) = (records.first()?, records.last()?);
    let mut replay = Replay::new(first.ms);
    for record in records {
        replay.apply(*record);
    }
    replay.advance_to(last.ms.saturating_add(TAIL_MS));
    Some(replay.lines)
}

fn usage() -> String {
    "usage: touch_replay <trace.txt> [--expect expected_events.txt]".to_string()
}

fn gesture_fields(event: &GestureEvent) -> String {
    match *event {
        GestureEvent::MapTap { server_x, server_y } => {
            format!("{} {server_x} {server_y}", event.label())
        }
        GestureEvent::MapDoubleTap { x, y } | GestureEvent::MenuTouch { x, y } => {
            format!("{} {x} {y}", event.label())
        }
        GestureEvent::UiButton(id) => format!("{} {id}", event.label()),
        GestureEvent::VolumeChange(percent) => format!("{} {percent}", event.label()),
        GestureEvent::Swipe(_) => event.label().to_string(),
    }
}

fn parse_trace(path: &Path) -> Result<Vec<ReplayRecord>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out: Vec<ReplayRecord> = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(format!(
                "{}:{} invalid trace line, expected '<ms> <kind> ...'",
                path.display(),
                line_no
            ));
        }
        let ms = parse_u64(parts[0], path, line_no, "ms")?;
        if let Some(previous) = out.last() {
            if ms < previous.ms {
                return Err(format!(
                    "{}:{} timestamps must not go backwards",
                    path.display(),
                    line_no
                ));
            }
        }

        let input = match (parts[1], parts.len()) {
            ("touch", 6) => {
                let finger_count = parse_u8(parts[2], path, line_no, "count")?;
                let phase = TouchPhase::from_label(parts[3]).ok_or_else(|| {
                    format!(
                        "{}:{} invalid phase '{}'",
                        path.display(),
                        line_no,
                        parts[3]
                    )
                })?;
                let x = parse_u16(parts[4], path, line_no, "x")?;
                let y = parse_u16(parts[5], path, line_no, "y")?;
                ReplayInput::Touch(TouchSample {
                    finger_count,
                    phase,
                    x,
                    y,
                })
            }
            ("none", 2) => ReplayInput::NoSample,
            ("button", 3) => match parts[2] {
                "1" => ReplayInput::Button { pressed: true },
                "0" => ReplayInput::Button { pressed: false },
                other => {
                    return Err(format!(
                        "{}:{} invalid button level '{}'",
                        path.display(),
                        line_no,
                        other
                    ))
                }
            },
            ("mode", 3) => ReplayInput::Mode(UiMode::from_label(parts[2]).ok_or_else(|| {
                format!(
                    "{}:{} invalid mode '{}'",
                    path.display(),
                    line_no,
                    parts[2]
                )
            })?),
            (kind, _) => {
                return Err(format!(
                    "{}:{} invalid trace record '{}'",
                    path.display(),
                    line_no,
                    kind
                ))
            }
        };

        out.push(ReplayRecord { ms, input });
    }

    Ok(out)
}

fn parse_expected(path: &Path) -> Result<Vec<String>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    Ok(lines)
}

fn parse_u64(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<u64, String> {
    raw.trim().parse::<u64>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}

fn parse_u16(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<u16, String> {
    raw.trim().parse::<u16>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}

fn parse_u8(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<u8, String> {
    raw.trim().parse::<u8>().map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw.trim(),
            e
        )
    })
}
