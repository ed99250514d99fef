use serde_json::{Value, json};
use wayfarer_test_model::{PresetResponse, TestModelProvider};

use super::*;

fn plan(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Tokyo Neon & Temples",
        "tagline": "Old Japan meets the future",
        "destination": "Tokyo & Kyoto, Japan",
        "duration": "7 days",
        "groupSize": "2 travelers",
        "totalCost": 4200.0,
        "rating": 4.8,
        "reviewCount": 1250,
        "image": "https://images.example.com/tokyo.jpg",
        "highlights": [
            "Sunrise at Fushimi Inari",
            "Tsukiji outer market food tour",
            "Shinkansen to Kyoto",
            "Ryokan night with onsen"
        ],
        "included": { "hotels": 6, "activities": 8, "transfers": 2 },
        "tags": ["culture", "food"],
        "aiConfidence": 92
    })
}

fn payload() -> Value {
    json!({
        "preferences": {
            "destination": "Japan",
            "duration": "1 week",
            "budget": "Flexible",
            "groupSize": "Solo",
            "travelStyle": "Flexible",
            "interests": ["food", "temples"],
            "conversationSummary": "A week in Japan focused on food and temples."
        },
        "plans": [plan("plan-1"), plan("plan-2"), plan("plan-3")]
    })
}

fn fenced(value: &Value) -> String {
    format!("```json\n{}\n```", serde_json::to_string_pretty(value).unwrap())
}

fn assert_rejected(raw: &str) {
    let err = parse_extraction(raw).unwrap_err();
    assert!(matches!(err, Error::Extraction(_)), "unexpected error: {err:?}");
}

#[test]
fn test_parse_fenced_output() {
    let extraction = parse_extraction(&fenced(&payload())).unwrap();
    assert_eq!(extraction.preferences.destination, "Japan");
    assert_eq!(extraction.preferences.group_size, "Solo");
    assert_eq!(extraction.preferences.interests, ["food", "temples"]);
    assert_eq!(extraction.plans.len(), PLAN_COUNT);
    assert_eq!(extraction.plans[0].total_cost, 4200.0);
    assert_eq!(extraction.plans[0].review_count, 1250);
    assert_eq!(extraction.plans[0].included["hotels"], 6);

    // Serializing gives back the same object.
    assert_eq!(serde_json::to_value(&extraction).unwrap(), payload());
}

#[test]
fn test_parse_spaced_fence_tag() {
    let raw = format!("``` json\n{}\n```", payload());
    let extraction = parse_extraction(&raw).unwrap();
    assert_eq!(extraction.plans.len(), PLAN_COUNT);
}

#[test]
fn test_whole_number_floats() {
    let mut value = payload();
    value["plans"][0]["aiConfidence"] = json!(92.0);
    value["plans"][0]["reviewCount"] = json!(1250.0);
    let extraction = parse_extraction(&fenced(&value)).unwrap();
    assert_eq!(extraction.plans[0].ai_confidence, 92);
    assert_eq!(extraction.plans[0].review_count, 1250);

    // Written back as integers.
    assert_eq!(serde_json::to_value(&extraction).unwrap(), payload());
}

#[test]
fn test_parse_bare_output() {
    let raw = serde_json::to_string(&payload()).unwrap();
    assert!(parse_extraction(&raw).is_ok());
}

#[test]
fn test_extra_fields_are_kept() {
    let mut value = payload();
    value["preferences"]["season"] = json!("spring");
    value["plans"][1]["currency"] = json!("USD");
    let extraction = parse_extraction(&fenced(&value)).unwrap();
    assert_eq!(extraction.preferences.extra["season"], "spring");
    assert_eq!(extraction.plans[1].extra["currency"], "USD");

    let round_trip = serde_json::to_value(&extraction).unwrap();
    assert_eq!(round_trip["plans"][1]["currency"], "USD");
}

#[test]
fn test_rejects_prose() {
    assert_rejected("Here are three wonderful plans for your trip to Japan!");
    assert_rejected("");
    assert_rejected("```json\n{\"preferences\": \n```");
}

#[test]
fn test_rejects_wrong_top_level() {
    assert_rejected("[1, 2, 3]");
    assert_rejected(r#"{"preferences": {}}"#);
    assert_rejected(&json!({ "plans": payload()["plans"] }).to_string());
}

#[test]
fn test_rejects_wrong_plan_count() {
    for count in [0, 2, 4] {
        let mut value = payload();
        value["plans"] = Value::Array((0..count).map(|i| plan(&i.to_string())).collect());
        assert_rejected(&fenced(&value));
    }
}

#[test]
fn test_rejects_missing_field() {
    let mut value = payload();
    value["preferences"]
        .as_object_mut()
        .unwrap()
        .remove("travelStyle");
    assert_rejected(&fenced(&value));

    let mut value = payload();
    value["plans"][2].as_object_mut().unwrap().remove("aiConfidence");
    assert_rejected(&fenced(&value));
}

#[test]
fn test_rejects_invalid_values() {
    let cases = [
        ("rating", json!(7.5)),
        ("rating", json!("4.5")),
        ("aiConfidence", json!(140)),
        ("aiConfidence", json!(-3)),
        ("totalCost", json!(-10)),
        ("reviewCount", json!(12.5)),
        ("reviewCount", json!(-4.0)),
        ("aiConfidence", json!(88.5)),
        ("aiConfidence", json!(5_000_000_000u64)),
        ("image", json!("tokyo.jpg")),
        ("image", json!("ftp://images.example.com/tokyo.jpg")),
        ("highlights", json!(["only one"])),
        ("included", json!({ "hotels": "six" })),
    ];
    for (field, invalid) in cases {
        let mut value = payload();
        value["plans"][0][field] = invalid;
        assert_rejected(&fenced(&value));
    }
}

#[tokio::test]
async fn test_extract() {
    let provider =
        TestModelProvider::with_responses([PresetResponse::text(fenced(&payload()))]);
    let extractor = Extractor::with_model_provider(provider.clone());

    let history = [
        ChatMessage::assistant("Hi! Where to?"),
        ChatMessage::user("I want a week in Japan"),
        ChatMessage::assistant("Lovely. What do you enjoy?"),
        ChatMessage::user("Food and temples"),
    ];
    let extraction = extractor.extract(&history).await.unwrap();
    assert_eq!(extraction.plans.len(), 3);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].temperature, Some(0.3));
    assert_eq!(requests[0].max_tokens, Some(4096));
    let [ModelMessage::User(prompt)] = requests[0].messages.as_slice() else {
        panic!("unexpected messages: {:?}", requests[0].messages);
    };
    assert!(prompt.starts_with(Instruction::Extraction.text()));
    assert!(prompt.ends_with(
        "Assistant: Hi! Where to?\nUser: I want a week in Japan\n\
         Assistant: Lovely. What do you enjoy?\nUser: Food and temples"
    ));
}

#[tokio::test]
async fn test_extract_failures() {
    let provider = TestModelProvider::with_responses([
        PresetResponse::status(500, "internal"),
        PresetResponse::empty(),
        PresetResponse::text("Sorry, I can't help with that."),
    ]);
    let extractor = Extractor::with_model_provider(provider.clone());
    let history = [ChatMessage::user("Somewhere warm")];
    for _ in 0..3 {
        let err = extractor.extract(&history).await.unwrap_err();
        assert!(matches!(err, Error::Extraction(_)), "unexpected error: {err:?}");
    }
    assert_eq!(provider.remaining(), 0);
}

#[tokio::test]
async fn test_extract_without_dialogue() {
    let provider = TestModelProvider::default();
    let extractor = Extractor::with_model_provider(provider.clone());
    let history = [ChatMessage::new(
        crate::conversation::Role::System,
        "persona",
    )];
    let err = extractor.extract(&history).await.unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
    assert!(provider.requests().is_empty());
}
