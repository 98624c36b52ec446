use brace_fmt::{Stringify, Value, brace_format};
use brace_fmt_macros::{Stringify, format_checked};

// ── Template-based derive: fields in declaration order ─────────────────

#[derive(Stringify)]
#[stringify(template = "x={:.1f},y={:.1f},motion={}")]
struct Track {
    x: f32,
    y: f32,
    motion: String,
}

// ── Explicit indices reorder fields ─────────────────────────────────────

#[derive(Stringify)]
#[stringify(template = "{1}, {0}")]
struct Name {
    first: &'static str,
    last: &'static str,
}

// ── Tuple struct ────────────────────────────────────────────────────────

#[derive(Stringify)]
#[stringify(template = "#{}-{}")]
struct Ticket(u32, bool);

// ── Unit struct with a fixed template ───────────────────────────────────

#[derive(Stringify)]
#[stringify(template = "unit")]
struct Marker;

// ── Method delegation ───────────────────────────────────────────────────

#[derive(Stringify)]
#[stringify(method = "describe")]
struct Sensor {
    id: u8,
}

impl Sensor {
    fn describe(&self) -> String {
        format!("sensor-{}", self.id)
    }
}

// ── Nested: a derived field renders through its own Stringify ──────────

#[derive(Stringify)]
#[stringify(template = "[{}] {}")]
struct Reading {
    sensor: Sensor,
    value: f64,
}

// ── Generic struct ──────────────────────────────────────────────────────

#[derive(Stringify)]
#[stringify(method = "label")]
struct Tagged<T: Clone + Into<Value>> {
    inner: T,
}

impl<T: Clone + Into<Value>> Tagged<T> {
    fn label(&self) -> String {
        let value: Value = self.inner.clone().into();
        format!("tagged:{value}")
    }
}

// ── Generic fields in a template ────────────────────────────────────────

#[derive(Stringify)]
#[stringify(template = "w={:.1f}")]
struct Wrap<T> {
    inner: T,
}

#[derive(Stringify)]
#[stringify(template = "{}: {}")]
struct Labelled<'a, T> {
    label: &'a str,
    value: &'a T,
}

// ── Tests ───────────────────────────────────────────────────────────────

#[test]
fn test_derive_template_struct() {
    let track = Track {
        x: 10.0,
        y: 1.0,
        motion: "Moving".to_string(),
    };
    assert_eq!(track.to_format_string(), "x=10.0,y=1.0,motion=Moving");
}

#[test]
fn test_derive_template_explicit_indices() {
    let name = Name {
        first: "Ada",
        last: "Lovelace",
    };
    assert_eq!(name.to_format_string(), "Lovelace, Ada");
}

#[test]
fn test_derive_tuple_struct() {
    assert_eq!(Ticket(42, true).to_format_string(), "#42-true");
}

#[test]
fn test_derive_unit_struct() {
    assert_eq!(Marker.to_format_string(), "unit");
}

#[test]
fn test_derive_method_delegation() {
    assert_eq!(Sensor { id: 7 }.to_format_string(), "sensor-7");
}

#[test]
fn test_derive_nested_custom_field() {
    let reading = Reading {
        sensor: Sensor { id: 3 },
        value: 0.5,
    };
    assert_eq!(reading.to_format_string(), "[sensor-3] 0.5");
}

#[test]
fn test_derive_generic_struct() {
    assert_eq!(Tagged { inner: 5i32 }.to_format_string(), "tagged:5");
}

#[test]
fn test_derive_template_generic_field_is_captured() {
    assert_eq!(Wrap { inner: 5i32 }.to_format_string(), "w=5");
    assert_eq!(Wrap { inner: 2.25f64 }.to_format_string(), "w=2.2");
    assert_eq!(Wrap { inner: "text" }.to_format_string(), "w=text");

    let hp = 99u16;
    let labelled = Labelled {
        label: "hp",
        value: &hp,
    };
    assert_eq!(labelled.to_format_string(), "hp: 99");
}

#[test]
fn test_derived_type_captured_as_custom() {
    let values = brace_fmt::args!(Sensor { id: 1 });
    assert_eq!(values, vec![Value::Custom("sensor-1".into())]);
}

#[test]
fn test_derived_type_in_brace_format() {
    let out = brace_format!("{} -> {:.2f}", Sensor { id: 2 }, 1.0f32).unwrap();
    assert_eq!(out, "sensor-2 -> 1.00");
}

#[test]
fn test_format_checked() {
    let hp = 99.5;
    let out: String = format_checked!("{} has {1:.2f} HP", "Alice", hp);
    assert_eq!(out, "Alice has 99.50 HP");
}

#[test]
fn test_format_checked_without_arguments() {
    assert_eq!(format_checked!(""), "");
    assert_eq!(format_checked!("plain {{ text"), "plain {{ text");
}

#[test]
fn test_format_checked_trailing_comma() {
    assert_eq!(format_checked!("{}-{}", 1, 2,), "1-2");
}

#[test]
fn test_checked_rendering_uses_default_options() {
    let out = brace_fmt::__render_checked("{} [{4}]", &brace_fmt::args!(1));
    assert_eq!(out, "1 []");
}

#[test]
#[should_panic(expected = "passed the expansion-time check")]
fn test_checked_rendering_never_echoes_a_bad_template() {
    brace_fmt::__render_checked("{x}", &brace_fmt::args!(1));
}
