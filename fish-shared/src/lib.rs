use serde::{Deserialize, Serialize};

/// Input from the presentation shell, already decoded into typed values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// The user asked for a new fish at this point.
    Spawn {
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        heading: Option<f32>,
    },
    /// The pointer moved; the stimulus follows it.
    StimulusMove { x: f32, y: f32 },
    /// The scare key was pressed or released.
    StimulusToggle { active: bool },
}

/// An event due before the given tick runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScheduledEvent {
    pub tick: u64,
    pub event: HostEvent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    #[default]
    Teleport,
    Bounce,
}

/// Simulation settings as loaded from a JSON file. Every field is optional in
/// the file and falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchoolSettings {
    pub width: f32,
    pub height: f32,
    pub boundary: Boundary,
    pub separation_strength: f32,
    pub alignment_enabled: bool,
    pub alignment_strength: f32,
    pub cohesion_enabled: bool,
    pub cohesion_strength: f32,
    pub leader_strength: f32,
    pub centroid_strength: f32,
    pub max_speed: f32,
    pub visible_radius: f32,
    /// Field of view in radians.
    pub visible_angle: f32,
    pub excited_speed: f32,
    pub scare_distance: f32,
}

impl Default for SchoolSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            boundary: Boundary::Teleport,
            separation_strength: 0.1,
            alignment_enabled: false,
            alignment_strength: 100.0,
            cohesion_enabled: false,
            cohesion_strength: 200.0,
            leader_strength: 0.0,
            centroid_strength: 0.0,
            max_speed: 120.0,
            visible_radius: 150.0,
            visible_angle: 1.5 * std::f32::consts::PI,
            excited_speed: 240.0,
            scare_distance: 100.0,
        }
    }
}

/// What the renderer needs to draw one fish.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FishSnapshot {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    /// Radians, `atan2(vy, vx)`.
    pub heading: f32,
}

/// One rendered frame of the school.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameReport {
    pub tick: u64,
    pub stimulus: StimulusState,
    pub fish: Vec<FishSnapshot>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StimulusState {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let event: HostEvent = serde_json::from_str(r#"{"type":"spawn","x":10.0,"y":20.0}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Spawn {
                x: 10.0,
                y: 20.0,
                heading: None
            }
        );

        let event: HostEvent =
            serde_json::from_str(r#"{"type":"stimulus_toggle","active":true}"#).unwrap();
        assert_eq!(event, HostEvent::StimulusToggle { active: true });

        let json = serde_json::to_string(&HostEvent::StimulusMove { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(json, r#"{"type":"stimulus_move","x":1.0,"y":2.0}"#);
    }

    #[test]
    fn test_scheduled_event() {
        let line = r#"{"tick":3,"event":{"type":"spawn","x":1.0,"y":2.0,"heading":0.5}}"#;
        let scheduled: ScheduledEvent = serde_json::from_str(line).unwrap();
        assert_eq!(scheduled.tick, 3);
        assert_eq!(
            scheduled.event,
            HostEvent::Spawn {
                x: 1.0,
                y: 2.0,
                heading: Some(0.5)
            }
        );
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: SchoolSettings =
            serde_json::from_str(r#"{"width":1024.0,"boundary":"bounce","cohesion_enabled":true}"#)
                .unwrap();
        assert_eq!(settings.width, 1024.0);
        assert_eq!(settings.height, 800.0);
        assert_eq!(settings.boundary, Boundary::Bounce);
        assert!(settings.cohesion_enabled);
        assert_eq!(settings.max_speed, 120.0);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(serde_json::from_str::<HostEvent>(r#"{"type":"explode"}"#).is_err());
    }
}
