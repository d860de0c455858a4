use measurement_protocol::{encode_batch, encode_hit, Error, Hit, RequiredField};

#[test]
fn hit_loaded_from_json_encodes() {
    let hit: Hit = serde_json::from_str(
        r#"{
            "tracking_id": "UA-1-1",
            "client_id": "abc",
            "hit_type": "event",
            "custom_values": [["ec", "video"], ["ea", "play now"]]
        }"#,
    )
    .unwrap();

    // `version` is filled in by the serde default.
    assert_eq!(
        encode_hit(&hit).unwrap(),
        "v=1&tid=UA-1-1&cid=abc&t=event&ec=video&ea=play+now"
    );
}

#[test]
fn explicit_null_version_is_missing() {
    let hit: Hit =
        serde_json::from_str(r#"{"version": null, "tracking_id": "UA-1-1", "client_id": "a"}"#)
            .unwrap();
    assert!(matches!(
        encode_hit(&hit),
        Err(Error::MissingRequiredField {
            field: RequiredField::Version
        })
    ));
}

#[test]
fn batch_body_has_one_line_per_hit() {
    let hits: Vec<Hit> = (0..5).map(|i| Hit::new("UA-1-1", i.to_string())).collect();
    let body = encode_batch(&hits).unwrap();
    assert_eq!(body.split('\n').count(), 5);
    for (i, line) in body.split('\n').enumerate() {
        assert!(line.contains(&format!("&cid={i}&")), "{line}");
    }
}

#[test]
fn non_ascii_values_are_utf8_percent_encoded() {
    let line = encode_hit(&Hit::new("UA-1-1", "1").page("/café")).unwrap();
    assert!(line.ends_with("&dp=%2Fcaf%C3%A9"));
}
