use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Batted-ball events
// ---------------------------------------------------------------------------

/// One CSV row as ingested: any cell may be missing. Column headers in the
/// source file are SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RawEvent {
    pub batter: Option<String>,
    pub pitcher: Option<String>,
    pub game_date: Option<String>,
    pub play_outcome: Option<String>,
    pub exit_speed: Option<f64>,
    pub launch_angle: Option<f64>,
    pub exit_direction: Option<f64>,
    pub hit_distance: Option<f64>,
}

/// A row with every field present and finite. Serialized with the source
/// column names so API consumers see the same keys as the file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BattedBallEvent {
    pub batter: String,
    pub pitcher: String,
    pub game_date: String,
    pub play_outcome: String,
    pub exit_speed: f64,
    pub launch_angle: f64,
    pub exit_direction: f64,
    pub hit_distance: f64,
}

impl RawEvent {
    /// Converts to a complete event, or `None` if any field is missing or
    /// any numeric field is non-finite (the listing endpoint's "dropna").
    pub fn complete(&self) -> Option<BattedBallEvent> {
        let finite = |v: &Option<f64>| v.filter(|v| v.is_finite());
        Some(BattedBallEvent {
            batter: self.batter.clone()?,
            pitcher: self.pitcher.clone()?,
            game_date: self.game_date.clone()?,
            play_outcome: self.play_outcome.clone()?,
            exit_speed: finite(&self.exit_speed)?,
            launch_angle: finite(&self.launch_angle)?,
            exit_direction: finite(&self.exit_direction)?,
            hit_distance: finite(&self.hit_distance)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Play outcomes
// ---------------------------------------------------------------------------

/// The six recognized play outcomes, in fixed palette/legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Single,
    Double,
    Triple,
    HomeRun,
    Out,
    Error,
}

impl PlayOutcome {
    pub const ALL: [PlayOutcome; 6] = [
        PlayOutcome::Single,
        PlayOutcome::Double,
        PlayOutcome::Triple,
        PlayOutcome::HomeRun,
        PlayOutcome::Out,
        PlayOutcome::Error,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PlayOutcome::Single => "Single",
            PlayOutcome::Double => "Double",
            PlayOutcome::Triple => "Triple",
            PlayOutcome::HomeRun => "HomeRun",
            PlayOutcome::Out => "Out",
            PlayOutcome::Error => "Error",
        }
    }
}

impl std::fmt::Display for PlayOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Graph request
// ---------------------------------------------------------------------------

/// Accepts either a single name or a list of names; the upstream clients
/// sent both shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flattens to a list of non-empty names. A lone empty string was the
    /// old "no filter" sentinel and collapses to an empty list here.
    pub fn into_names(self) -> Vec<String> {
        let items = match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// `POST /api/graph` body. All fields optional; see `GraphFilter` for the
/// defaulting and validation rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphRequest {
    pub outcomes: Option<Vec<String>>,
    /// `[min, max]`; an empty array means "no filter", like an absent one.
    pub exit_speed_range: Option<Vec<f64>>,
    pub launch_angle_range: Option<Vec<f64>>,
    #[serde(alias = "batterName")]
    pub batter_names: Option<OneOrMany>,
    #[serde(alias = "pitcherName")]
    pub pitcher_names: Option<OneOrMany>,
    pub dates: Option<Vec<String>>,
    pub color_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GraphResponse {
    /// Base64-encoded PNG.
    pub image: String,
}

// ---------------------------------------------------------------------------
// Color encoding selector
// ---------------------------------------------------------------------------

/// Closed five-way dispatch for the scatter color encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorBy {
    #[default]
    Outcome,
    Date,
    BatterName,
    PitcherName,
    ExitSpeed,
}

impl std::str::FromStr for ColorBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "outcome" => Ok(ColorBy::Outcome),
            "date" => Ok(ColorBy::Date),
            "batter_name" => Ok(ColorBy::BatterName),
            "pitcher_name" => Ok(ColorBy::PitcherName),
            "exit_speed" => Ok(ColorBy::ExitSpeed),
            other => Err(format!("unknown colorBy value: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_requires_every_field() {
        let ev = RawEvent {
            batter: Some("A. Batter".into()),
            pitcher: Some("B. Pitcher".into()),
            game_date: Some("2018-05-01".into()),
            play_outcome: Some("Single".into()),
            exit_speed: Some(95.2),
            launch_angle: Some(12.0),
            exit_direction: Some(-20.0),
            hit_distance: Some(210.0),
        };
        assert!(ev.complete().is_some());

        let mut missing = ev.clone();
        missing.pitcher = None;
        assert!(missing.complete().is_none());

        let mut nan = ev;
        nan.exit_speed = Some(f64::NAN);
        assert!(nan.complete().is_none());
    }

    #[test]
    fn one_or_many_drops_empty_sentinel() {
        let one = OneOrMany::One("".into());
        assert!(one.into_names().is_empty());

        let many = OneOrMany::Many(vec!["".into(), "J. Smith".into(), "  ".into()]);
        assert_eq!(many.into_names(), vec!["J. Smith".to_string()]);
    }

    #[test]
    fn color_by_rejects_unknown() {
        assert_eq!("exit_speed".parse::<ColorBy>(), Ok(ColorBy::ExitSpeed));
        assert!("velocity".parse::<ColorBy>().is_err());
    }

    #[test]
    fn request_accepts_both_name_shapes() {
        let single: GraphRequest =
            serde_json::from_str(r#"{"batterName": "J. Smith"}"#).unwrap();
        assert_eq!(
            single.batter_names.unwrap().into_names(),
            vec!["J. Smith".to_string()]
        );

        let multi: GraphRequest =
            serde_json::from_str(r#"{"batterNames": ["A", "B"]}"#).unwrap();
        assert_eq!(
            multi.batter_names.unwrap().into_names(),
            vec!["A".to_string(), "B".to_string()]
        );
    }
}
