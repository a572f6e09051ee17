use gitjson::json;
use serde_json::{Value, json};

#[test]
fn document_round_trips_through_a_compliant_parser() {
    let mut buffer = Vec::new();
    {
        let mut root = json::object(&mut buffer).unwrap();
        root.field("repository", "myrepo").unwrap();
        {
            let mut branches = root.array("branches").unwrap();
            {
                let mut branch = branches.push_object().unwrap();
                branch.field("name", "master").unwrap();
                {
                    let mut commit = branch.object("commit").unwrap();
                    commit.field("sha", "0a1b2c").unwrap();
                    commit
                        .field("url", "/api/repos/myrepo/commits/0a1b2c")
                        .unwrap();
                    commit.finish().unwrap();
                }
                branch.finish().unwrap();
            }
            {
                let mut branch = branches.push_object().unwrap();
                branch.field("name", "develop").unwrap();
                branch.finish().unwrap();
            }
            branches.finish().unwrap();
        }
        root.field("size", 123usize).unwrap();
        root.field("offset", -4i64).unwrap();
        root.finish().unwrap();
    }

    let parsed: Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(
        parsed,
        json!({
            "repository": "myrepo",
            "branches": [
                {
                    "name": "master",
                    "commit": {
                        "sha": "0a1b2c",
                        "url": "/api/repos/myrepo/commits/0a1b2c"
                    }
                },
                { "name": "develop" }
            ],
            "size": 123,
            "offset": -4
        })
    );
}

#[test]
fn array_element_order_is_preserved() {
    let mut buffer = Vec::new();
    {
        let mut array = json::array(&mut buffer).unwrap();
        for element in ["z", "a", "m"] {
            array.push(element).unwrap();
        }
        array.finish().unwrap();
    }

    let parsed: Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(parsed, json!(["z", "a", "m"]));
}

#[test]
fn escaped_characters_unescape_to_the_original() {
    for c in ['"', '\\', '\u{8}', '\u{c}', '\n', '\r', '\t'] {
        let original = format!("a{c}b");
        let mut buffer = Vec::new();
        {
            let mut object = json::compact_object(&mut buffer).unwrap();
            object.field("value", &original).unwrap();
            object.finish().unwrap();
        }

        let parsed: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, json!({ "value": original }), "character {c:?}");
    }
}

#[test]
fn control_characters_round_trip_through_unicode_escapes() {
    let original = "x\u{1}\u{1f}y";
    let mut buffer = Vec::new();
    {
        let mut object = json::compact_object(&mut buffer).unwrap();
        object.field("value", original).unwrap();
        object.finish().unwrap();
    }

    let text = std::str::from_utf8(&buffer).unwrap();
    assert!(text.contains("\\u0001"), "{text}");
    assert!(text.contains("\\u001f"), "{text}");

    let parsed: Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(parsed, json!({ "value": original }));
}

#[test]
fn escaped_keys_parse_back() {
    let mut buffer = Vec::new();
    {
        let mut object = json::compact_object(&mut buffer).unwrap();
        object.field("with \"quotes\"", "v").unwrap();
        object.finish().unwrap();
    }

    let parsed: Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(parsed, json!({ "with \"quotes\"": "v" }));
}

#[test]
fn pretty_output_parses_identically_to_compact() {
    let build = |buffer: &mut Vec<u8>, pretty: bool| {
        let mut object = if pretty {
            json::object(buffer).unwrap()
        } else {
            json::compact_object(buffer).unwrap()
        };
        object.field("name", "Ada").unwrap();
        {
            let mut tags = object.array("tags").unwrap();
            tags.push("x").unwrap();
            tags.push("y").unwrap();
            tags.finish().unwrap();
        }
        object.finish().unwrap();
    };

    let mut pretty = Vec::new();
    let mut compact = Vec::new();
    build(&mut pretty, true);
    build(&mut compact, false);

    let pretty: Value = serde_json::from_slice(&pretty).unwrap();
    let compact: Value = serde_json::from_slice(&compact).unwrap();
    assert_eq!(pretty, compact);
    assert_eq!(compact, json!({ "name": "Ada", "tags": ["x", "y"] }));
}
