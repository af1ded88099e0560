//! # Animation Variant Registry
//!
//! Named, reusable descriptions of visual states and the transitions that reach them.
//!
//! ## Responsibilities
//! - **Descriptors**: `TargetState` values (opacity, offsets, scale, width, shadow) plus a `Transition`.
//! - **Parametrized states**: a state may be a function of one number (an ordinal or a level),
//!   resolved at the point of use.
//! - **Registry**: the lazily built global table every section reads from.
//!
//! ## Key Types
//! - `Variant`: A named map from `StateName` to `StateDef`.
//! - `VariantRegistry`: Lookup table keyed by variant name.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;
use tracing::error;

use crate::animation::{EasingType, SpringConfig};
use crate::errors::VariantError;
use crate::stagger::{StaggerPolicy, When};

/// Names of the built-in variants.
pub mod names {
    pub const CARD: &str = "card";
    pub const BUTTON: &str = "button";
    pub const CONTAINER: &str = "container";
    pub const HERO_TEXT: &str = "heroText";
    pub const SKILL_BAR: &str = "skillBar";
    pub const SCROLL_REVEAL: &str = "scrollReveal";
    pub const NAV_ITEM: &str = "navItem";
    pub const FADE_IN_UP: &str = "fadeInUp";
    pub const PROJECT_CARD: &str = "projectCard";
    pub const SKILL_CARD: &str = "skillCard";
    pub const TEXT_REVEAL: &str = "textReveal";
    pub const TEXT_SEGMENT: &str = "textSegment";
    pub const MENU_LIST: &str = "menuList";
    pub const NAVBAR: &str = "navbar";
    pub const NAV_BRAND: &str = "navBrand";
    pub const FADE_IN: &str = "fadeIn";
    pub const BACKDROP: &str = "backdrop";
    pub const AVATAR: &str = "avatar";
    pub const SCROLL_HINT: &str = "scrollHint";
    pub const LIFT: &str = "lift";
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StateName {
    Hidden,
    Visible,
    Hover,
    Tap,
    Open,
    Closed,
}

impl StateName {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateName::Hidden => "hidden",
            StateName::Visible => "visible",
            StateName::Hover => "hover",
            StateName::Tap => "tap",
            StateName::Open => "open",
            StateName::Closed => "closed",
        }
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Numeric value of the length, in its own unit.
    pub fn value(&self) -> f32 {
        match self {
            Length::Px(v) | Length::Percent(v) => *v,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", v),
            Length::Percent(v) => write!(f, "{}%", v),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Timing {
    Spring(SpringConfig),
    Tween { duration: f64, easing: EasingType },
}

/// How a state is reached: timing curve, start delay and optional child orchestration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub timing: Timing,
    pub delay: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestration: Option<StaggerPolicy>,
}

impl Default for Transition {
    fn default() -> Self {
        Self::tween(0.3, EasingType::EaseOut)
    }
}

impl Transition {
    pub fn spring(stiffness: f32, damping: f32) -> Self {
        Self {
            timing: Timing::Spring(SpringConfig::new(stiffness, damping)),
            delay: 0.0,
            orchestration: None,
        }
    }

    pub fn tween(duration: f64, easing: EasingType) -> Self {
        Self {
            timing: Timing::Tween { duration, easing },
            delay: 0.0,
            orchestration: None,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn orchestrate(mut self, policy: StaggerPolicy) -> Self {
        self.orchestration = Some(policy);
        self
    }
}

/// Animatable numeric properties of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Opacity,
    X,
    Y,
    Scale,
    Width,
}

impl Property {
    pub const ALL: [Property; 5] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::Scale,
        Property::Width,
    ];

    /// Value a node shows when no state has touched the property.
    pub fn resting(&self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::X | Property::Y => 0.0,
            Property::Width => 100.0,
        }
    }
}

/// A concrete visual state. Unset properties are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

impl TargetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, v: f32) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn x(mut self, v: f32) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f32) -> Self {
        self.y = Some(v);
        self
    }

    pub fn scale(mut self, v: f32) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn width(mut self, v: Length) -> Self {
        self.width = Some(v);
        self
    }

    pub fn box_shadow(mut self, v: &'static str) -> Self {
        self.box_shadow = Some(v);
        self
    }

    pub fn transition(mut self, t: Transition) -> Self {
        self.transition = Some(t);
        self
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.x,
            Property::Y => self.y,
            Property::Scale => self.scale,
            Property::Width => self.width.map(|w| w.value()),
        }
    }

    /// The transition to use when animating into this state.
    pub fn transition_or_default(&self) -> Transition {
        self.transition.unwrap_or_default()
    }

    /// Start delay carried by this state's own transition.
    pub fn delay(&self) -> f64 {
        self.transition.map(|t| t.delay).unwrap_or(0.0)
    }
}

/// A state definition: either fixed, or computed from one numeric argument.
#[derive(Clone, Copy)]
pub enum StateDef {
    Fixed(fn() -> TargetState),
    Custom(fn(f32) -> TargetState),
}

impl StateDef {
    /// Resolves the definition. A missing argument resolves as 0.
    pub fn resolve(&self, custom: Option<f32>) -> TargetState {
        match self {
            StateDef::Fixed(f) => f(),
            StateDef::Custom(f) => f(custom.unwrap_or(0.0)),
        }
    }

    pub fn is_parametrized(&self) -> bool {
        matches!(self, StateDef::Custom(_))
    }
}

impl fmt::Debug for StateDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateDef::Fixed(_) => f.write_str("Fixed"),
            StateDef::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Variant {
    pub name: &'static str,
    states: BTreeMap<StateName, StateDef>,
}

impl Variant {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            states: BTreeMap::new(),
        }
    }

    pub fn with_state(mut self, state: StateName, def: fn() -> TargetState) -> Self {
        self.states.insert(state, StateDef::Fixed(def));
        self
    }

    pub fn with_custom(mut self, state: StateName, def: fn(f32) -> TargetState) -> Self {
        self.states.insert(state, StateDef::Custom(def));
        self
    }

    /// Checks that the variant has both a resting and a revealed state.
    pub fn validate(&self) -> Result<(), VariantError> {
        if !self.states.contains_key(&StateName::Hidden)
            && !self.states.contains_key(&StateName::Closed)
        {
            return Err(VariantError::MissingState {
                variant: self.name,
                missing: StateName::Hidden,
            });
        }
        if !self.states.contains_key(&StateName::Visible)
            && !self.states.contains_key(&StateName::Open)
        {
            return Err(VariantError::MissingState {
                variant: self.name,
                missing: StateName::Visible,
            });
        }
        Ok(())
    }

    pub fn initial_state(&self) -> StateName {
        if self.states.contains_key(&StateName::Hidden) {
            StateName::Hidden
        } else {
            StateName::Closed
        }
    }

    pub fn final_state(&self) -> StateName {
        if self.states.contains_key(&StateName::Visible) {
            StateName::Visible
        } else {
            StateName::Open
        }
    }

    pub fn has_state(&self, state: StateName) -> bool {
        self.states.contains_key(&state)
    }

    pub fn is_parametrized(&self, state: StateName) -> bool {
        self.states
            .get(&state)
            .map(StateDef::is_parametrized)
            .unwrap_or(false)
    }

    pub fn state_names(&self) -> impl Iterator<Item = StateName> + '_ {
        self.states.keys().copied()
    }

    pub fn resolve(&self, state: StateName, custom: Option<f32>) -> Option<TargetState> {
        self.states.get(&state).map(|def| def.resolve(custom))
    }

    pub fn initial(&self, custom: Option<f32>) -> TargetState {
        self.resolve(self.initial_state(), custom).unwrap_or_default()
    }

    pub fn revealed(&self, custom: Option<f32>) -> TargetState {
        self.resolve(self.final_state(), custom).unwrap_or_default()
    }
}

/// Serializable description of a registered variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInfo {
    pub name: &'static str,
    pub states: Vec<StateInfo>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInfo {
    pub state: StateName,
    pub parametrized: bool,
    /// The state resolved with argument 0 (or the fixed state).
    pub resolved: TargetState,
}

static REGISTRY: OnceLock<VariantRegistry> = OnceLock::new();

#[derive(Debug, Default)]
pub struct VariantRegistry {
    variants: HashMap<&'static str, Variant>,
}

impl VariantRegistry {
    /// Get the global registry instance.
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::with_builtins)
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        for variant in builtin_variants() {
            if let Err(err) = reg.register(variant) {
                error!("Rejected built-in variant: {}", err);
            }
        }
        reg
    }

    pub fn register(&mut self, variant: Variant) -> Result<(), VariantError> {
        variant.validate()?;
        if self.variants.contains_key(variant.name) {
            return Err(VariantError::Duplicate(variant.name));
        }
        self.variants.insert(variant.name, variant);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Variant, VariantError> {
        self.variants
            .get(name)
            .ok_or_else(|| VariantError::UnknownVariant(name.to_string()))
    }

    pub fn resolve(
        &self,
        name: &str,
        state: StateName,
        custom: Option<f32>,
    ) -> Result<Option<TargetState>, VariantError> {
        Ok(self.get(name)?.resolve(state, custom))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.variants.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn describe(&self) -> Vec<VariantInfo> {
        self.names()
            .into_iter()
            .filter_map(|name| self.variants.get(name))
            .map(|variant| VariantInfo {
                name: variant.name,
                states: variant
                    .states
                    .iter()
                    .map(|(state, def)| StateInfo {
                        state: *state,
                        parametrized: def.is_parametrized(),
                        resolved: def.resolve(None),
                    })
                    .collect(),
            })
            .collect()
    }
}

const STAGGER_STEP: f64 = 0.1;
const CARD_SHADOW: &str = "0 15px 30px rgba(0, 0, 0, 0.07)";
const PROJECT_SHADOW: &str = "0 20px 40px rgba(0, 0, 0, 0.1)";

fn builtin_variants() -> Vec<Variant> {
    use StateName::*;

    vec![
        Variant::new(names::CARD)
            .with_state(Hidden, || TargetState::new().opacity(0.0).y(20.0))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .y(0.0)
                    .transition(Transition::spring(260.0, 20.0))
            })
            .with_state(Hover, || {
                TargetState::new()
                    .y(-10.0)
                    .box_shadow(CARD_SHADOW)
                    .transition(Transition::spring(400.0, 10.0))
            })
            .with_state(Tap, || {
                TargetState::new()
                    .scale(0.98)
                    .transition(Transition::spring(400.0, 10.0))
            }),
        Variant::new(names::BUTTON)
            .with_state(Hidden, || TargetState::new().opacity(0.0).scale(0.9))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .scale(1.0)
                    .transition(Transition::spring(300.0, 20.0))
            })
            .with_state(Hover, || {
                TargetState::new()
                    .scale(1.05)
                    .transition(Transition::spring(400.0, 10.0))
            })
            .with_state(Tap, || {
                TargetState::new()
                    .scale(0.95)
                    .transition(Transition::spring(400.0, 10.0))
            }),
        Variant::new(names::CONTAINER)
            .with_state(Hidden, || TargetState::new().opacity(0.0))
            .with_state(Visible, || {
                TargetState::new().opacity(1.0).transition(
                    Transition::default().orchestrate(StaggerPolicy::new(0.1, 0.2)),
                )
            }),
        Variant::new(names::HERO_TEXT)
            .with_state(Hidden, || TargetState::new().opacity(0.0).y(20.0))
            .with_custom(Visible, |index| {
                TargetState::new()
                    .opacity(1.0)
                    .y(0.0)
                    .transition(Transition::spring(200.0, 12.0).with_delay(STAGGER_STEP * index as f64))
            }),
        Variant::new(names::SKILL_BAR)
            .with_state(Hidden, || TargetState::new().width(Length::Px(0.0)))
            .with_custom(Visible, |level| {
                TargetState::new()
                    .width(Length::Percent(level))
                    .transition(Transition::tween(1.0, EasingType::EaseOut))
            }),
        Variant::new(names::SCROLL_REVEAL)
            .with_state(Hidden, || TargetState::new().opacity(0.0).y(50.0))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .y(0.0)
                    .transition(Transition::spring(200.0, 20.0))
            }),
        Variant::new(names::NAV_ITEM)
            .with_state(Closed, || TargetState::new().opacity(0.0).x(-10.0))
            .with_custom(Open, |index| {
                TargetState::new()
                    .opacity(1.0)
                    .x(0.0)
                    .transition(Transition::spring(300.0, 24.0).with_delay(STAGGER_STEP * index as f64))
            }),
        Variant::new(names::FADE_IN_UP)
            .with_state(Hidden, || TargetState::new().opacity(0.0).y(30.0))
            .with_custom(Visible, |index| {
                TargetState::new().opacity(1.0).y(0.0).transition(
                    Transition::tween(0.5, EasingType::EaseOut).with_delay(STAGGER_STEP * index as f64),
                )
            }),
        Variant::new(names::SKILL_CARD)
            .with_state(Hidden, || TargetState::new().opacity(0.0).y(30.0))
            .with_custom(Visible, |index| {
                TargetState::new().opacity(1.0).y(0.0).transition(
                    Transition::tween(0.5, EasingType::EaseOut).with_delay(STAGGER_STEP * index as f64),
                )
            })
            .with_state(Hover, || {
                TargetState::new()
                    .y(-5.0)
                    .transition(Transition::spring(300.0, 10.0))
            }),
        Variant::new(names::PROJECT_CARD)
            .with_state(Hidden, || TargetState::new().opacity(0.0).scale(0.9))
            .with_custom(Visible, |index| {
                TargetState::new()
                    .opacity(1.0)
                    .scale(1.0)
                    .transition(Transition::spring(200.0, 20.0).with_delay(STAGGER_STEP * index as f64))
            })
            .with_state(Hover, || {
                TargetState::new()
                    .y(-10.0)
                    .box_shadow(PROJECT_SHADOW)
                    .transition(Transition::spring(300.0, 15.0))
            }),
        Variant::new(names::TEXT_REVEAL)
            .with_state(Hidden, || TargetState::new().opacity(0.0))
            .with_custom(Visible, |delay| {
                let delay = delay as f64;
                TargetState::new().opacity(1.0).transition(
                    Transition::default()
                        .orchestrate(StaggerPolicy::new(delay, delay).when(When::WithChildren)),
                )
            }),
        Variant::new(names::TEXT_SEGMENT)
            .with_state(Hidden, || {
                TargetState::new()
                    .opacity(0.0)
                    .y(20.0)
                    .x(-10.0)
                    .transition(Transition::spring(200.0, 12.0))
            })
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .y(0.0)
                    .x(0.0)
                    .transition(Transition::spring(200.0, 12.0))
            }),
        Variant::new(names::MENU_LIST)
            .with_state(Closed, TargetState::new)
            .with_state(Open, || {
                TargetState::new().transition(
                    Transition::default()
                        .orchestrate(StaggerPolicy::new(0.1, 0.1).when(When::WithChildren)),
                )
            }),
        Variant::new(names::NAVBAR)
            .with_state(Hidden, || TargetState::new().y(-100.0))
            .with_state(Visible, || {
                TargetState::new()
                    .y(0.0)
                    .transition(Transition::spring(300.0, 30.0))
            }),
        Variant::new(names::NAV_BRAND)
            .with_state(Hidden, || TargetState::new().opacity(0.0).x(-20.0))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .x(0.0)
                    .transition(Transition::tween(0.5, EasingType::EaseOut).with_delay(0.2))
            }),
        Variant::new(names::FADE_IN)
            .with_state(Hidden, || TargetState::new().opacity(0.0))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .transition(Transition::tween(0.5, EasingType::EaseOut).with_delay(0.4))
            }),
        Variant::new(names::BACKDROP)
            .with_state(Hidden, || TargetState::new().opacity(0.0))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .transition(Transition::tween(1.5, EasingType::EaseInOut))
            }),
        Variant::new(names::AVATAR)
            .with_state(Hidden, || TargetState::new().opacity(0.0).scale(0.8))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .scale(1.0)
                    .transition(Transition::spring(260.0, 20.0).with_delay(0.4))
            }),
        Variant::new(names::SCROLL_HINT)
            .with_state(Hidden, || TargetState::new().opacity(0.0).y(-20.0))
            .with_state(Visible, || {
                TargetState::new()
                    .opacity(1.0)
                    .y(0.0)
                    .transition(Transition::tween(0.5, EasingType::EaseOut).with_delay(1.0))
            }),
        Variant::new(names::LIFT)
            .with_state(Hidden, TargetState::new)
            .with_state(Visible, || {
                TargetState::new()
                    .y(0.0)
                    .transition(Transition::spring(400.0, 10.0))
            })
            .with_state(Hover, || {
                TargetState::new()
                    .y(-3.0)
                    .transition(Transition::spring(400.0, 10.0))
            }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_all_register() {
        let reg = VariantRegistry::with_builtins();
        assert_eq!(reg.len(), builtin_variants().len());
        for name in [
            names::CARD,
            names::BUTTON,
            names::CONTAINER,
            names::HERO_TEXT,
            names::SKILL_BAR,
            names::SCROLL_REVEAL,
            names::NAV_ITEM,
            names::FADE_IN_UP,
            names::PROJECT_CARD,
        ] {
            assert!(reg.get(name).is_ok(), "missing {}", name);
        }
    }

    #[test]
    fn skill_bar_width_tracks_level() {
        let reg = VariantRegistry::global();
        let at = |level: f32| {
            reg.resolve(names::SKILL_BAR, StateName::Visible, Some(level))
                .unwrap()
                .unwrap()
                .width
        };
        assert_eq!(at(0.0), Some(Length::Percent(0.0)));
        assert_eq!(at(85.0), Some(Length::Percent(85.0)));
        assert_eq!(at(100.0), Some(Length::Percent(100.0)));
        // Levels pass through unclamped.
        assert_eq!(at(120.0), Some(Length::Percent(120.0)));
    }

    #[test]
    fn indexed_delay_defaults_to_zero() {
        let reg = VariantRegistry::global();
        let resolved = reg
            .resolve(names::FADE_IN_UP, StateName::Visible, None)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.transition.unwrap().delay, 0.0);
        assert_eq!(resolved.delay(), 0.0);

        let third = reg
            .resolve(names::FADE_IN_UP, StateName::Visible, Some(3.0))
            .unwrap()
            .unwrap();
        assert!((third.transition.unwrap().delay - 0.3).abs() < 1e-9);
    }

    #[test]
    fn variant_without_final_state_is_rejected() {
        let mut reg = VariantRegistry::new();
        let err = reg
            .register(Variant::new("broken").with_state(StateName::Hidden, TargetState::new))
            .unwrap_err();
        assert_eq!(
            err,
            VariantError::MissingState {
                variant: "broken",
                missing: StateName::Visible
            }
        );
    }

    #[test]
    fn unknown_variant_is_an_error() {
        let err = VariantRegistry::global()
            .resolve("nope", StateName::Visible, None)
            .unwrap_err();
        assert_eq!(err, VariantError::UnknownVariant("nope".into()));
    }

    #[test]
    fn skill_card_lifts_on_hover() {
        let variant = VariantRegistry::global().get(names::SKILL_CARD).unwrap();
        assert!(variant.has_state(StateName::Hover));
        let hover = variant.resolve(StateName::Hover, None).unwrap();
        assert_eq!(hover.y, Some(-5.0));
        assert_eq!(hover.opacity, None);
        assert_eq!(variant.initial(None).y, Some(30.0));
    }

    #[test]
    fn nav_item_uses_open_closed_pair() {
        let variant = VariantRegistry::global().get(names::NAV_ITEM).unwrap();
        assert_eq!(variant.initial_state(), StateName::Closed);
        assert_eq!(variant.final_state(), StateName::Open);
        assert_eq!(variant.initial(None).x, Some(-10.0));
    }
}
