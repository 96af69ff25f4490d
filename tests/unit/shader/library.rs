use super::*;

fn isf_inputs() -> Vec<ShaderInput> {
    serde_json::from_str(
        r#"[
            {"NAME": "inputImage", "TYPE": "image"},
            {"NAME": "speed", "TYPE": "float", "DEFAULT": 0.25, "MIN": 0.0, "MAX": 1.0},
            {"NAME": "zoom", "TYPE": "float", "MIN": 0.5, "MAX": 4.0},
            {"NAME": "invert", "TYPE": "bool", "DEFAULT": 1},
            {"NAME": "tint", "TYPE": "color", "DEFAULT": [1.0, 0.5, 0.0, 1.0]},
            {"NAME": "center", "TYPE": "point2D"},
            {"NAME": "spectrum", "TYPE": "audioFFT"},
            {"NAME": "flash", "TYPE": "event"}
        ]"#,
    )
    .unwrap()
}

#[test]
fn parses_isf_input_metadata() {
    let inputs = isf_inputs();
    assert_eq!(inputs.len(), 8);
    assert_eq!(inputs[0].kind, InputKind::Image);
    assert_eq!(inputs[5].kind, InputKind::Point2D);
    assert_eq!(inputs[6].kind, InputKind::AudioFft);
    assert_eq!(inputs[1].max, Some(1.0));
}

#[test]
fn defaults_skip_media_and_fall_back_sensibly() {
    let params = default_parameters(&isf_inputs());
    assert!(!params.contains_key("inputImage"));
    assert!(!params.contains_key("spectrum"));
    assert_eq!(params["speed"], ParamValue::Number(0.25));
    assert_eq!(params["zoom"], ParamValue::Number(0.5));
    assert_eq!(params["invert"], ParamValue::Bool(true));
    assert_eq!(params["tint"], ParamValue::Color([1.0, 0.5, 0.0, 1.0]));
    assert_eq!(params["center"], ParamValue::Vector2([0.0, 0.0]));
    assert_eq!(params["flash"], ParamValue::Bool(false));
}

#[test]
fn library_lookup() {
    let mut lib = InMemoryShaderLibrary::new();
    lib.register("plasma", isf_inputs());
    assert_eq!(lib.inputs("plasma").map(<[ShaderInput]>::len), Some(8));
    assert!(lib.inputs("missing").is_none());
}
