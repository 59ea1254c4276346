//! Live-editable configuration surface.
//!
//! Input handlers translate key presses into [`ControlCommand`]s; applying a
//! command clamps and snaps the edited value to its slider bounds and reports
//! what the application should do next as a [`ControlEffect`].

use crate::params::{bounds, GalaxyParameters, ParameterBounds};

/// Editable galaxy parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        ParameterField::Count,
        ParameterField::Size,
        ParameterField::Radius,
        ParameterField::Branches,
        ParameterField::Spin,
        ParameterField::Randomness,
        ParameterField::RandomnessPower,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParameterField::Count => "count",
            ParameterField::Size => "size",
            ParameterField::Radius => "radius",
            ParameterField::Branches => "branches",
            ParameterField::Spin => "spin",
            ParameterField::Randomness => "randomness",
            ParameterField::RandomnessPower => "randomnessPower",
        }
    }

    pub fn bounds(self) -> ParameterBounds {
        match self {
            ParameterField::Count => bounds::COUNT,
            ParameterField::Size => bounds::SIZE,
            ParameterField::Radius => bounds::RADIUS,
            ParameterField::Branches => bounds::BRANCHES,
            ParameterField::Spin => bounds::SPIN,
            ParameterField::Randomness => bounds::RANDOMNESS,
            ParameterField::RandomnessPower => bounds::RANDOMNESS_POWER,
        }
    }

    /// Change applied by one key press
    pub fn nudge(self) -> f64 {
        match self {
            ParameterField::Count => 5_000.0,
            ParameterField::Size => 0.005,
            ParameterField::Radius => 0.25,
            ParameterField::Branches => 1.0,
            ParameterField::Spin => 0.1,
            ParameterField::Randomness => 0.05,
            ParameterField::RandomnessPower => 0.25,
        }
    }

    pub fn get(self, params: &GalaxyParameters) -> f64 {
        match self {
            ParameterField::Count => params.count as f64,
            ParameterField::Size => params.size as f64,
            ParameterField::Radius => params.radius as f64,
            ParameterField::Branches => params.branches as f64,
            ParameterField::Spin => params.spin as f64,
            ParameterField::Randomness => params.randomness as f64,
            ParameterField::RandomnessPower => params.randomness_power as f64,
        }
    }

    /// Store `value` after constraining it to this field's bounds
    pub fn set(self, params: &mut GalaxyParameters, value: f64) {
        let value = self.bounds().constrain(value);
        match self {
            ParameterField::Count => params.count = value.round() as usize,
            ParameterField::Size => params.size = value as f32,
            ParameterField::Radius => params.radius = value as f32,
            ParameterField::Branches => params.branches = value.round() as u32,
            ParameterField::Spin => params.spin = value as f32,
            ParameterField::Randomness => params.randomness = value as f32,
            ParameterField::RandomnessPower => params.randomness_power = value as f32,
        }
    }
}

/// User intent coming from the input layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    SelectNext,
    SelectPrevious,
    Select(ParameterField),
    Increase,
    Decrease,
    Set(ParameterField, f64),
    Regenerate,
    ToggleMusic,
    VolumeUp,
    VolumeDown,
}

/// What the application must do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEffect {
    /// Rebuild the galaxy from these parameters
    Regenerate(GalaxyParameters),
    SetPlaying(bool),
    SetVolume(f32),
    /// Only the selection changed
    Selection(ParameterField),
}

/// Parameter set plus audio pass-through settings
#[derive(Debug, Clone)]
pub struct ControlSurface {
    params: GalaxyParameters,
    selected: usize,
    volume: f32,
    playing: bool,
}

/// Volume change per key press
const VOLUME_NUDGE: f64 = 0.05;

impl ControlSurface {
    /// Wrap `params`, constraining every field to its bounds
    pub fn new(mut params: GalaxyParameters, volume: f32, playing: bool) -> Self {
        for field in ParameterField::ALL {
            let value = field.get(&params);
            field.set(&mut params, value);
        }
        Self {
            params,
            selected: 0,
            volume: bounds::VOLUME.constrain(volume as f64) as f32,
            playing,
        }
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    pub fn selected(&self) -> ParameterField {
        ParameterField::ALL[self.selected]
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn apply(&mut self, command: ControlCommand) -> Option<ControlEffect> {
        let fields = ParameterField::ALL.len();
        match command {
            ControlCommand::SelectNext => {
                self.selected = (self.selected + 1) % fields;
                Some(ControlEffect::Selection(self.selected()))
            }
            ControlCommand::SelectPrevious => {
                self.selected = (self.selected + fields - 1) % fields;
                Some(ControlEffect::Selection(self.selected()))
            }
            ControlCommand::Select(field) => {
                self.selected = ParameterField::ALL.iter().position(|f| *f == field)?;
                Some(ControlEffect::Selection(field))
            }
            ControlCommand::Increase => self.edit(self.selected(), 1.0),
            ControlCommand::Decrease => self.edit(self.selected(), -1.0),
            ControlCommand::Set(field, value) => {
                let before = self.params.clone();
                field.set(&mut self.params, value);
                (self.params != before).then(|| ControlEffect::Regenerate(self.params.clone()))
            }
            ControlCommand::Regenerate => Some(ControlEffect::Regenerate(self.params.clone())),
            ControlCommand::ToggleMusic => {
                self.playing = !self.playing;
                Some(ControlEffect::SetPlaying(self.playing))
            }
            ControlCommand::VolumeUp => self.change_volume(VOLUME_NUDGE),
            ControlCommand::VolumeDown => self.change_volume(-VOLUME_NUDGE),
        }
    }

    /// One-line summary for the window title
    pub fn describe(&self) -> String {
        let field = self.selected();
        format!(
            "{} = {} | volume {:.2}{}",
            field.label(),
            format_value(field, field.get(&self.params)),
            self.volume,
            if self.playing { "" } else { " (paused)" }
        )
    }

    fn edit(&mut self, field: ParameterField, direction: f64) -> Option<ControlEffect> {
        let value = field.get(&self.params) + direction * field.nudge();
        self.apply(ControlCommand::Set(field, value))
    }

    fn change_volume(&mut self, delta: f64) -> Option<ControlEffect> {
        let volume = bounds::VOLUME.constrain(self.volume as f64 + delta) as f32;
        if volume == self.volume {
            return None;
        }
        self.volume = volume;
        Some(ControlEffect::SetVolume(volume))
    }
}

fn format_value(field: ParameterField, value: f64) -> String {
    match field {
        ParameterField::Count | ParameterField::Branches => format!("{}", value.round()),
        _ => format!("{:.3}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> ControlSurface {
        ControlSurface::new(GalaxyParameters::default(), 1.0, true)
    }

    #[test]
    fn test_new_constrains_out_of_range_params() {
        let params = GalaxyParameters {
            count: 10,
            branches: 50,
            randomness_power: 0.2,
            ..GalaxyParameters::default()
        };
        let surface = ControlSurface::new(params, 3.0, true);

        assert_eq!(surface.params().count, 20_000);
        assert_eq!(surface.params().branches, 20);
        assert_eq!(surface.params().randomness_power, 1.0);
        assert_eq!(surface.volume(), 1.0);
    }

    #[test]
    fn test_increase_regenerates_with_new_value() {
        let mut surface = surface();
        surface.apply(ControlCommand::Select(ParameterField::Branches));

        let effect = surface.apply(ControlCommand::Increase);
        match effect {
            Some(ControlEffect::Regenerate(params)) => assert_eq!(params.branches, 4),
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_edits_at_bounds_are_ignored() {
        let mut surface = surface();
        surface.apply(ControlCommand::Set(ParameterField::Count, 100_000.0));
        assert_eq!(surface.params().count, 100_000);

        surface.apply(ControlCommand::Select(ParameterField::Count));
        assert_eq!(surface.apply(ControlCommand::Increase), None);
        assert_eq!(surface.params().count, 100_000);
    }

    #[test]
    fn test_selection_wraps() {
        let mut surface = surface();
        assert_eq!(surface.selected(), ParameterField::Count);

        surface.apply(ControlCommand::SelectPrevious);
        assert_eq!(surface.selected(), ParameterField::RandomnessPower);
        surface.apply(ControlCommand::SelectNext);
        assert_eq!(surface.selected(), ParameterField::Count);
    }

    #[test]
    fn test_set_snaps_to_step() {
        let mut surface = surface();
        surface.apply(ControlCommand::Set(ParameterField::Count, 33_333.0));
        assert_eq!(surface.params().count, 33_300);

        surface.apply(ControlCommand::Set(ParameterField::Spin, -9.0));
        assert!((surface.params().spin + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_audio_pass_through() {
        let mut surface = surface();
        assert_eq!(
            surface.apply(ControlCommand::ToggleMusic),
            Some(ControlEffect::SetPlaying(false))
        );

        // Already at full volume
        assert_eq!(surface.apply(ControlCommand::VolumeUp), None);
        match surface.apply(ControlCommand::VolumeDown) {
            Some(ControlEffect::SetVolume(v)) => assert!((v - 0.95).abs() < 1e-6),
            other => panic!("unexpected effect {:?}", other),
        }
        assert!(surface.describe().contains("(paused)"));
    }
}
