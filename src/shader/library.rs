use std::collections::BTreeMap;

use crate::timeline::model::ParamValue;

/// Declared type of an ISF shader input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    /// Floating-point scalar.
    Float,
    /// Integer choice, stored as a number.
    Long,
    /// Boolean toggle.
    Bool,
    /// Momentary trigger.
    Event,
    /// RGBA color.
    Color,
    /// 2D point.
    #[serde(rename = "point2D")]
    Point2D,
    /// Image input; supplied by the renderer, never a clip parameter.
    Image,
    /// Audio waveform input.
    Audio,
    /// Audio spectrum input.
    #[serde(rename = "audioFFT")]
    AudioFft,
}

impl InputKind {
    /// Return `true` for inputs fed by external media rather than clip parameters.
    pub fn is_external_resource(self) -> bool {
        matches!(self, Self::Image | Self::Audio | Self::AudioFft)
    }
}

/// One declared shader input, as found in ISF metadata.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShaderInput {
    /// Input name; becomes the clip parameter key.
    #[serde(rename = "NAME")]
    pub name: String,
    /// Declared type.
    #[serde(rename = "TYPE")]
    pub kind: InputKind,
    /// Declared default, in raw JSON form.
    #[serde(rename = "DEFAULT", default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Declared minimum (numeric inputs).
    #[serde(rename = "MIN", default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Declared maximum (numeric inputs).
    #[serde(rename = "MAX", default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Source of shader metadata. Implemented by the shader loader.
pub trait ShaderLibrary {
    /// Declared inputs of `shader_id`, or `None` when the shader is unknown.
    fn inputs(&self, shader_id: &str) -> Option<&[ShaderInput]>;
}

/// Map-backed [`ShaderLibrary`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryShaderLibrary {
    shaders: BTreeMap<String, Vec<ShaderInput>>,
}

impl InMemoryShaderLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the inputs of `shader_id`.
    pub fn register(&mut self, shader_id: impl Into<String>, inputs: Vec<ShaderInput>) {
        self.shaders.insert(shader_id.into(), inputs);
    }
}

impl ShaderLibrary for InMemoryShaderLibrary {
    fn inputs(&self, shader_id: &str) -> Option<&[ShaderInput]> {
        self.shaders.get(shader_id).map(Vec::as_slice)
    }
}

fn json_floats<const N: usize>(v: Option<&serde_json::Value>) -> Option<[f64; N]> {
    let arr = v?.as_array()?;
    if arr.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(arr) {
        *slot = item.as_f64()?;
    }
    Some(out)
}

fn json_bool(v: Option<&serde_json::Value>) -> Option<bool> {
    match v? {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::Number(n) => n.as_f64().map(|x| x != 0.0),
        _ => None,
    }
}

/// Starting value of a single input, or `None` for external resources.
pub fn default_value(input: &ShaderInput) -> Option<ParamValue> {
    let declared = input.default.as_ref();
    let value = match input.kind {
        InputKind::Float | InputKind::Long => ParamValue::Number(
            declared
                .and_then(serde_json::Value::as_f64)
                .or(input.min)
                .unwrap_or(0.0),
        ),
        InputKind::Bool | InputKind::Event => {
            ParamValue::Bool(json_bool(declared).unwrap_or(false))
        }
        InputKind::Color => {
            ParamValue::Color(json_floats(declared).unwrap_or([0.0, 0.0, 0.0, 1.0]))
        }
        InputKind::Point2D => ParamValue::Vector2(json_floats(declared).unwrap_or([0.0, 0.0])),
        InputKind::Image | InputKind::Audio | InputKind::AudioFft => return None,
    };
    Some(value)
}

/// Seed a new clip's parameter map from declared inputs, skipping media inputs.
pub fn default_parameters(inputs: &[ShaderInput]) -> BTreeMap<String, ParamValue> {
    inputs
        .iter()
        .filter_map(|input| default_value(input).map(|v| (input.name.clone(), v)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/shader/library.rs"]
mod tests;
