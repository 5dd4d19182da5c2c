//! Request validation and the row filter pipeline.
//!
//! Predicates apply in a fixed order (outcome, exit speed, launch angle,
//! batter, pitcher, date), each only when its input is non-empty, and
//! compose as logical AND. A missing cell fails any predicate applied
//! to it.

use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::types::{ColorBy, GraphRequest, PlayOutcome, RawEvent};

/// Validated filter criteria for one graph request.
#[derive(Debug, Clone)]
pub struct GraphFilter {
    /// Always non-empty: absent in the request means "all six outcomes",
    /// an explicitly empty list is rejected.
    pub outcomes: Vec<String>,
    pub exit_speed: Option<(f64, f64)>,
    pub launch_angle: Option<(f64, f64)>,
    pub batters: Vec<String>,
    pub pitchers: Vec<String>,
    pub dates: Vec<String>,
    pub color_by: ColorBy,
}

impl GraphFilter {
    pub fn from_request(req: GraphRequest) -> Result<Self> {
        let outcomes = match req.outcomes {
            None => PlayOutcome::ALL.iter().map(|o| o.label().to_string()).collect(),
            Some(v) if v.is_empty() => {
                return Err(AppError::BadRequest("No outcomes provided".to_string()))
            }
            Some(v) => v,
        };

        let color_by = match req.color_by.as_deref() {
            None => ColorBy::default(),
            Some(s) => ColorBy::from_str(s).map_err(AppError::BadRequest)?,
        };

        Ok(Self {
            outcomes,
            exit_speed: range(req.exit_speed_range, "exitSpeedRange")?,
            launch_angle: range(req.launch_angle_range, "launchAngleRange")?,
            batters: req.batter_names.map(|n| n.into_names()).unwrap_or_default(),
            pitchers: req.pitcher_names.map(|n| n.into_names()).unwrap_or_default(),
            dates: req.dates.unwrap_or_default(),
            color_by,
        })
    }

    /// True when the row passes every active predicate.
    pub fn matches(&self, ev: &RawEvent) -> bool {
        member(&self.outcomes, &ev.play_outcome)
            && in_range(self.exit_speed, ev.exit_speed)
            && in_range(self.launch_angle, ev.launch_angle)
            && member_opt(&self.batters, &ev.batter)
            && member_opt(&self.pitchers, &ev.pitcher)
            && member_opt(&self.dates, &ev.game_date)
    }

    /// Applies the pipeline, keeping source order.
    pub fn apply<'a>(&self, events: &'a [RawEvent]) -> Vec<&'a RawEvent> {
        events.iter().filter(|ev| self.matches(ev)).collect()
    }
}

/// `[min, max]` becomes inclusive bounds; absent or empty means "no
/// filter"; any other length is a bad request.
fn range(bounds: Option<Vec<f64>>, field: &str) -> Result<Option<(f64, f64)>> {
    match bounds.as_deref() {
        None | Some([]) => Ok(None),
        Some(&[min, max]) => Ok(Some((min, max))),
        Some(other) => Err(AppError::BadRequest(format!(
            "{field} must be [min, max], got {} values",
            other.len()
        ))),
    }
}

/// Membership against a mandatory set (outcomes): the set is never empty,
/// so a row missing the value never matches.
fn member(set: &[String], value: &Option<String>) -> bool {
    match value {
        Some(v) => set.iter().any(|s| s == v),
        None => false,
    }
}

/// Membership against an optional set: an empty set means "no filter".
fn member_opt(set: &[String], value: &Option<String>) -> bool {
    if set.is_empty() {
        return true;
    }
    member(set, value)
}

/// Inclusive range check; no bounds means "no filter".
fn in_range(bounds: Option<(f64, f64)>, value: Option<f64>) -> bool {
    match bounds {
        None => true,
        Some((min, max)) => match value {
            Some(v) => v >= min && v <= max,
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OneOrMany;

    fn event(outcome: &str, speed: f64, angle: f64, batter: &str, date: &str) -> RawEvent {
        RawEvent {
            batter: Some(batter.to_string()),
            pitcher: Some("C. Kershaw".to_string()),
            game_date: Some(date.to_string()),
            play_outcome: Some(outcome.to_string()),
            exit_speed: Some(speed),
            launch_angle: Some(angle),
            exit_direction: Some(0.0),
            hit_distance: Some(200.0),
        }
    }

    #[test]
    fn absent_outcomes_default_to_all_six() {
        let filter = GraphFilter::from_request(GraphRequest::default()).unwrap();
        assert_eq!(filter.outcomes.len(), 6);
        assert!(filter.matches(&event("HomeRun", 104.0, 28.0, "A. Judge", "2018-05-01")));
    }

    #[test]
    fn empty_outcomes_list_is_rejected() {
        let req = GraphRequest {
            outcomes: Some(vec![]),
            ..Default::default()
        };
        assert!(matches!(
            GraphFilter::from_request(req),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn unknown_color_by_is_rejected() {
        let req = GraphRequest {
            color_by: Some("velocity".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            GraphFilter::from_request(req),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn predicates_compose_as_and() {
        let req = GraphRequest {
            outcomes: Some(vec!["Single".to_string(), "Double".to_string()]),
            exit_speed_range: Some(vec![90.0, 105.0]),
            launch_angle_range: Some(vec![0.0, 30.0]),
            batter_names: Some(OneOrMany::One("A. Judge".to_string())),
            dates: Some(vec!["2018-05-01".to_string()]),
            ..Default::default()
        };
        let filter = GraphFilter::from_request(req).unwrap();

        assert!(filter.matches(&event("Single", 95.0, 12.0, "A. Judge", "2018-05-01")));
        // one predicate off at a time
        assert!(!filter.matches(&event("Out", 95.0, 12.0, "A. Judge", "2018-05-01")));
        assert!(!filter.matches(&event("Single", 89.9, 12.0, "A. Judge", "2018-05-01")));
        assert!(!filter.matches(&event("Single", 95.0, 31.0, "A. Judge", "2018-05-01")));
        assert!(!filter.matches(&event("Single", 95.0, 12.0, "M. Trout", "2018-05-01")));
        assert!(!filter.matches(&event("Single", 95.0, 12.0, "A. Judge", "2018-05-02")));
    }

    #[test]
    fn empty_range_array_means_no_filter() {
        let req: GraphRequest =
            serde_json::from_str(r#"{"exitSpeedRange": [], "launchAngleRange": []}"#).unwrap();
        let filter = GraphFilter::from_request(req).unwrap();
        assert!(filter.exit_speed.is_none());
        assert!(filter.launch_angle.is_none());
        // a row outside any plausible bounds still matches
        assert!(filter.matches(&event("Single", 5.0, 89.0, "A. Judge", "2018-05-01")));
    }

    #[test]
    fn wrong_length_range_is_rejected() {
        let req = GraphRequest {
            exit_speed_range: Some(vec![90.0]),
            ..Default::default()
        };
        assert!(matches!(
            GraphFilter::from_request(req),
            Err(AppError::BadRequest(_))
        ));

        let req = GraphRequest {
            launch_angle_range: Some(vec![0.0, 10.0, 20.0]),
            ..Default::default()
        };
        assert!(matches!(
            GraphFilter::from_request(req),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let req = GraphRequest {
            exit_speed_range: Some(vec![90.0, 105.0]),
            ..Default::default()
        };
        let filter = GraphFilter::from_request(req).unwrap();
        assert!(filter.matches(&event("Single", 90.0, 10.0, "A. Judge", "2018-05-01")));
        assert!(filter.matches(&event("Single", 105.0, 10.0, "A. Judge", "2018-05-01")));
        assert!(!filter.matches(&event("Single", 105.01, 10.0, "A. Judge", "2018-05-01")));
    }

    #[test]
    fn empty_string_sentinel_means_no_name_filter() {
        let req = GraphRequest {
            batter_names: Some(OneOrMany::Many(vec!["".to_string()])),
            ..Default::default()
        };
        let filter = GraphFilter::from_request(req).unwrap();
        assert!(filter.batters.is_empty());
        assert!(filter.matches(&event("Single", 95.0, 12.0, "Anyone", "2018-05-01")));
    }

    #[test]
    fn missing_cell_fails_an_active_predicate() {
        let req = GraphRequest {
            exit_speed_range: Some(vec![0.0, 200.0]),
            ..Default::default()
        };
        let filter = GraphFilter::from_request(req).unwrap();
        let mut ev = event("Single", 95.0, 12.0, "A. Judge", "2018-05-01");
        ev.exit_speed = None;
        assert!(!filter.matches(&ev));

        // without the range filter the same row passes
        let open = GraphFilter::from_request(GraphRequest::default()).unwrap();
        assert!(open.matches(&ev));
    }

    #[test]
    fn apply_keeps_source_order() {
        let events = vec![
            event("Single", 95.0, 12.0, "A. Judge", "2018-05-01"),
            event("Out", 80.0, -5.0, "M. Trout", "2018-05-01"),
            event("Single", 99.0, 15.0, "A. Judge", "2018-05-02"),
        ];
        let req = GraphRequest {
            outcomes: Some(vec!["Single".to_string()]),
            ..Default::default()
        };
        let filter = GraphFilter::from_request(req).unwrap();
        let kept = filter.apply(&events);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].game_date.as_deref(), Some("2018-05-02"));
    }
}
