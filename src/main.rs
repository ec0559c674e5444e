use anyhow::Result;
use skyview_core::Config;
use skyview_ui::{SearchController, SearchSession};
use skyview_weather::AssetRef;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of terminal input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Query(String),
    Select(usize),
    ToggleUnit,
    NewSearch,
    Submit,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Query(line.to_string());
    };

    match rest.trim() {
        "q" => Command::Quit,
        "u" => Command::ToggleUnit,
        "n" => Command::NewSearch,
        "s" => Command::Submit,
        other => match other.parse::<usize>() {
            Ok(n) if (1..=skyview_weather::MAX_CANDIDATES).contains(&n) => Command::Select(n - 1),
            _ => Command::Unknown(other.to_string()),
        },
    }
}

fn render(session: &SearchSession) {
    println!();
    if let Some(message) = session.error_message() {
        println!("! {}", message);
    }

    if session.is_loading() {
        println!("Loading...");
    }

    if let (Some(snapshot), Some(place)) = (session.snapshot(), session.place_label()) {
        println!("{}", place);
        if let Some(temperature) = session.temperature_display() {
            println!("  {}  {}", temperature, snapshot.description());
        }
        println!(
            "  Humidity {}% ({})  Wind {}",
            snapshot.relative_humidity_percent,
            snapshot.humidity_label(),
            snapshot.format_wind()
        );
        println!("  Weather code: {}", snapshot.condition_code);
    } else {
        for (i, candidate) in session.candidates().iter().enumerate() {
            println!("  :{} {}", i + 1, candidate.label());
        }
    }

    println!("[background: {}]", background_line(session.background()));
}

fn background_line(asset: AssetRef) -> String {
    let kind = if asset.is_video() { "video" } else { "image" };
    format!("{} {}", kind, asset.path)
}

#[tokio::main]
async fn main() -> Result<()> {
    skyview_core::init()?;

    let (config, _) = Config::load_validated()?;
    let mut controller = SearchController::from_config(&config)?;

    tracing::info!("SkyView started");
    println!("SkyView - type a city name. :1-:5 select, :u unit, :n new search, :s submit, :q quit");
    render(controller.session());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Query(text) => controller.edit_query(text),
                    Command::Select(index) => {
                        if !controller.select_candidate(index) {
                            println!("No suggestion :{}", index + 1);
                        }
                    }
                    Command::ToggleUnit => {
                        controller.toggle_unit();
                    }
                    Command::NewSearch => controller.new_search(),
                    Command::Submit => controller.submit(),
                    Command::Unknown(cmd) => {
                        println!("Unknown command :{}", cmd);
                        continue;
                    }
                }
                render(controller.session());
            }
            Some(event) = controller.next_event() => {
                if controller.apply(event) {
                    render(controller.session());
                }
            }
        }
    }

    tracing::info!("SkyView exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("Lon"), Command::Query("Lon".into()));
        assert_eq!(parse_command(""), Command::Query(String::new()));
        assert_eq!(parse_command(":1"), Command::Select(0));
        assert_eq!(parse_command(":5"), Command::Select(4));
        assert_eq!(parse_command(":6"), Command::Unknown("6".into()));
        assert_eq!(parse_command(":0"), Command::Unknown("0".into()));
        assert_eq!(parse_command(":u"), Command::ToggleUnit);
        assert_eq!(parse_command(":n"), Command::NewSearch);
        assert_eq!(parse_command(":s"), Command::Submit);
        assert_eq!(parse_command(":q"), Command::Quit);
    }

    #[test]
    fn test_background_line_names_kind() {
        assert_eq!(
            background_line(skyview_weather::background::FALLBACK),
            "video assets/857251-hd_1620_1080_25fps.mp4"
        );
        assert_eq!(
            background_line(skyview_weather::background::RAIN),
            "image assets/Rain.gif"
        );
    }
}
