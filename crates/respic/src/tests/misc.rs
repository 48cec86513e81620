use crate::*;
use serde_json::json;

#[test]
fn build_then_inject_round_trip() {
    let sources = vec![
        ConditionedSource {
            condition: "(max-width:400px)".to_string(),
            variant: Variant::new("b.jpg", 300),
        },
        ConditionedSource {
            condition: "(max-width:800px)".to_string(),
            variant: Variant::new("c.jpg", 700),
        },
    ];
    let tags = build_source_tags(&sources);
    let out = wrap_first_image(r#"<img src="a.jpg">"#, &tags);

    let b = out.find("srcset=\"b.jpg\"").expect("b.jpg source");
    let c = out.find("srcset=\"c.jpg\"").expect("c.jpg source");
    let img = out.find(r#"<img src="a.jpg">"#).expect("untouched img");
    let close = out.find("</picture>").expect("close tag");
    assert!(out.starts_with("<picture>"));
    assert!(b < c && c < img && img < close);
}

#[test]
fn parsed_variants_always_have_nonempty_urls_and_integer_widths() {
    let raw = ",a.jpg 10w,, 20w, b 0w, http://h/i.jpg 4096w, x.jpg -5w, y.jpg 1.5w";
    for variant in parse_candidate_list(raw) {
        assert!(!variant.url.is_empty());
        // u32 widths: non-negative by construction; just pin the survivors.
        assert!(matches!(variant.width, 0 | 10 | 4096));
    }
}

#[test]
fn engine_accepts_config_from_a_json_settings_blob() {
    let config = EngineConfig::from_value(json!({ "breakpoint_margin": 60 })).unwrap();
    let engine = Engine::with_config(config);
    let sources = engine.resolve_sources(SourceStrategy::Derived {
        candidates: "a.jpg 300w",
    });
    assert_eq!(sources[0].condition, "(max-width:360px)");
}

#[test]
fn conditioned_sources_serialize_for_inspection_tooling() {
    let sources = vec![ConditionedSource {
        condition: "(max-width:480px)".to_string(),
        variant: Variant::named("thumbnail", "t.jpg", 150),
    }];
    let value = serde_json::to_value(&sources).unwrap();
    assert_eq!(
        value,
        json!([{
            "condition": "(max-width:480px)",
            "variant": { "name": "thumbnail", "url": "t.jpg", "width": 150 }
        }])
    );
}
