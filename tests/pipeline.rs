mod common;

use std::fs;
use std::sync::Arc;

use idf_simhash::{
    cal_weights, fingerprint, hash_token, Error, HashWeight, Resources, SimHashFingerprint,
    Simhasher, FULL_HASHBITS,
};

fn load() -> Simhasher {
    let fx = common::fixture();
    let resources = Resources::load(&fx.dict, &fx.idf, &fx.stop_words).unwrap();
    Simhasher::new(Arc::new(resources))
}

#[test]
fn loads_all_three_resources() {
    let hasher = load();
    let resources = hasher.resources();
    assert_eq!(resources.idf().len(), 8);
    assert_eq!(resources.stop_words().len(), 4);
    assert_eq!(resources.idf().get("黄鹤"), Some(12.25));
    assert!(resources.stop_words().contains("了"));
}

#[test]
fn fingerprint_of_loaded_text_matches_manual_vote() {
    let hasher = load();
    let text = "江南皮革厂倒闭了";
    let expected = fingerprint(&cal_weights(&[
        HashWeight::new(hash_token("江南"), 9.5),
        HashWeight::new(hash_token("皮革厂"), 11.75),
        HashWeight::new(hash_token("倒闭"), 8.0),
    ]));
    assert_eq!(hasher.simhash(text, FULL_HASHBITS), expected);
    assert_eq!(hasher.simhash(text, FULL_HASHBITS), hasher.simhash(text, -1));
}

#[test]
fn shared_resources_give_identical_fingerprints() {
    let hasher = load();
    let other = load();
    let text = "江南皮革厂倒闭了，老板黄鹤带着小姨子跑了!";
    assert_eq!(
        hasher.fingerprint(text, FULL_HASHBITS),
        other.fingerprint(text, FULL_HASHBITS)
    );

    let clone = hasher.clone();
    let handle = std::thread::spawn(move || clone.simhash(text, FULL_HASHBITS));
    assert_eq!(handle.join().unwrap(), hasher.simhash(text, FULL_HASHBITS));
}

#[test]
fn stop_word_noise_keeps_fingerprint() {
    let hasher = load();
    let a = hasher.fingerprint("江南皮革厂倒闭了", FULL_HASHBITS);
    let b = hasher.fingerprint("江南。皮革厂，倒闭!", FULL_HASHBITS);
    assert_eq!(a.hamming_distance(&b), 0);
}

#[test]
fn empty_text_is_all_ones() {
    let hasher = load();
    assert_eq!(hasher.fingerprint("", FULL_HASHBITS), SimHashFingerprint(u64::MAX));
    assert_eq!(hasher.simhash("了了。", 12), 0xFFF);
}

#[test]
fn batch_preserves_order() {
    let hasher = load();
    let docs = ["江南皮革厂倒闭了", "老板黄鹤带着小姨子跑了", "", "跑"];
    let batch = hasher.simhash_batch(&docs, 32);
    assert_eq!(batch.len(), docs.len());
    for (doc, fp) in docs.iter().zip(&batch) {
        assert_eq!(*fp, hasher.simhash(doc, 32));
    }
}

#[test]
fn missing_resource_file_is_reported() {
    let fx = common::fixture();
    let missing = fx.dict.with_file_name("nope.txt");
    let err = Resources::load(&fx.dict, &missing, &fx.stop_words).unwrap_err();
    match err {
        Error::ResourceLoad { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_idf_file_is_reported() {
    let fx = common::fixture();
    fs::write(&fx.idf, "江南 9.5\n倒闭 eight\n").unwrap();
    let err = Resources::load(&fx.dict, &fx.idf, &fx.stop_words).unwrap_err();
    assert!(matches!(err, Error::Malformed { line: 2, .. }), "{err}");
}
