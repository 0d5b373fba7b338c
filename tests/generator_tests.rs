//! Code generator tests
//!
//! Uniqueness, code shape, resolution, exhaustion and concurrency of
//! `CodeGenerator` against both store backends.

use std::collections::HashSet;
use std::sync::Arc;

use codelink::errors::CodelinkError;
use codelink::generator::{
    CodeFormat, CodeGenerator, DEFAULT_ALPHABET, FixedClock, FixedEntropy, MAX_CODE_LENGTH,
    SequenceEntropy,
};
use codelink::storage::{CodeStore, MemoryStore, ShardedStore};

fn generator_with(store: Arc<dyn CodeStore>) -> Arc<CodeGenerator> {
    Arc::new(CodeGenerator::new(store))
}

// =============================================================================
// Shape and uniqueness
// =============================================================================

#[test]
fn test_generate_then_resolve() {
    let generator = generator_with(Arc::new(MemoryStore::new()));

    let code = generator.generate("https://example.com/a").unwrap();
    assert_eq!(generator.resolve(&code).unwrap(), "https://example.com/a");
}

#[test]
fn test_codes_have_fixed_shape() {
    let generator = generator_with(Arc::new(MemoryStore::new()));

    for i in 0..500 {
        let code = generator.generate(&format!("https://example.com/{}", i)).unwrap();
        assert_eq!(code.chars().count(), 6);
        assert!(code.chars().all(|c| DEFAULT_ALPHABET.contains(c)), "bad code {}", code);
    }
}

#[test]
fn test_custom_format_shape() {
    let format = CodeFormat::new("0123456789abcdef", 10).unwrap();
    let generator = CodeGenerator::builder(Arc::new(ShardedStore::new()))
        .format(format.clone())
        .build();

    for i in 0..100 {
        let code = generator.generate(&format!("https://example.com/{}", i)).unwrap();
        assert!(format.matches(&code), "bad code {}", code);
    }
}

#[test]
fn test_longest_accepted_format_generates() {
    assert!(CodeFormat::new(DEFAULT_ALPHABET, usize::MAX).is_err());

    let format = CodeFormat::new(DEFAULT_ALPHABET, MAX_CODE_LENGTH).unwrap();
    let generator = CodeGenerator::builder(Arc::new(MemoryStore::new()))
        .format(format.clone())
        .build();
    let code = generator.generate("https://example.com").unwrap();
    assert_eq!(code.chars().count(), MAX_CODE_LENGTH);
    assert!(format.matches(&code));
}

#[test]
fn test_uniqueness_and_exact_resolution() {
    for store in [
        Arc::new(MemoryStore::new()) as Arc<dyn CodeStore>,
        Arc::new(ShardedStore::new()),
    ] {
        let generator = generator_with(store);
        let mut seen = HashSet::new();
        let mut issued = Vec::new();

        for i in 0..2000 {
            // 重复使用少量目标，验证同一目标可获得多个独立短码
            let target = format!("https://example.com/{}", i % 50);
            let code = generator.generate(&target).unwrap();
            assert!(seen.insert(code.clone()), "duplicate code {}", code);
            assert_eq!(generator.resolve(&code).unwrap(), target);
            issued.push((code, target));
        }

        assert_eq!(generator.size(), 2000);
        for (code, target) in issued {
            assert_eq!(generator.resolve(&code).unwrap(), target);
        }
    }
}

#[test]
fn test_same_target_gets_distinct_codes() {
    let generator = generator_with(Arc::new(MemoryStore::new()));
    let a = generator.generate("https://example.com/same").unwrap();
    let b = generator.generate("https://example.com/same").unwrap();
    assert_ne!(a, b);
    assert_eq!(generator.size(), 2);
}

#[test]
fn test_deterministic_sources_reproduce_codes() {
    let build = || {
        CodeGenerator::builder(Arc::new(MemoryStore::new()))
            .clock(Arc::new(FixedClock(42)))
            .entropy(Arc::new(SequenceEntropy::starting_at(1000)))
            .build()
    };

    let first: Vec<String> = {
        let generator = build();
        (0..20)
            .map(|i| generator.generate(&format!("https://example.com/{}", i)).unwrap())
            .collect()
    };
    let second: Vec<String> = {
        let generator = build();
        (0..20)
            .map(|i| generator.generate(&format!("https://example.com/{}", i)).unwrap())
            .collect()
    };
    assert_eq!(first, second);
}

#[test]
fn test_fixed_sources_still_avoid_collisions() {
    // 时钟与随机数都固定时，只能依靠尝试次数与加盐层级避开碰撞
    let generator = CodeGenerator::builder(Arc::new(MemoryStore::new()))
        .clock(Arc::new(FixedClock(7)))
        .entropy(Arc::new(FixedEntropy(7)))
        .build();

    let mut seen = HashSet::new();
    for _ in 0..10 {
        let code = generator.generate("https://example.com/fixed").unwrap();
        assert!(seen.insert(code));
    }
    assert!(matches!(
        generator.generate("https://example.com/fixed"),
        Err(CodelinkError::GenerationExhausted(_))
    ));
    assert_eq!(generator.size(), 10);
}

// =============================================================================
// Resolution errors
// =============================================================================

#[test]
fn test_resolve_not_found() {
    let generator = generator_with(Arc::new(MemoryStore::new()));
    assert!(matches!(
        generator.resolve("nonexistent"),
        Err(CodelinkError::NotFound(_))
    ));
}

#[test]
fn test_resolve_empty_input() {
    let generator = generator_with(Arc::new(MemoryStore::new()));
    assert!(matches!(generator.resolve(""), Err(CodelinkError::EmptyInput(_))));
    assert!(matches!(generator.resolve("   "), Err(CodelinkError::EmptyInput(_))));
}

#[test]
fn test_resolve_is_idempotent() {
    let generator = generator_with(Arc::new(MemoryStore::new()));
    let code = generator.generate("https://example.com/a").unwrap();
    for _ in 0..5 {
        assert_eq!(generator.resolve(&code).unwrap(), "https://example.com/a");
    }
    assert_eq!(generator.size(), 1);
}

// =============================================================================
// Exhaustion
// =============================================================================

#[test]
fn test_exhaustion_when_code_space_is_full() {
    let store: Arc<dyn CodeStore> = Arc::new(MemoryStore::new());
    store.put("a", "https://a.example");
    store.put("b", "https://b.example");

    let generator = CodeGenerator::builder(store.clone())
        .format(CodeFormat::new("ab", 1).unwrap())
        .build();

    let err = generator.generate("https://example.com").unwrap_err();
    assert!(matches!(err, CodelinkError::GenerationExhausted(_)));
    assert_eq!(store.size(), 2);
    assert_eq!(store.get("a").as_deref(), Some("https://a.example"));
    assert_eq!(store.get("b").as_deref(), Some("https://b.example"));
}

#[test]
fn test_tiny_space_fills_then_exhausts() {
    let store: Arc<dyn CodeStore> = Arc::new(ShardedStore::new());
    let generator = CodeGenerator::builder(store.clone())
        .format(CodeFormat::new("ab", 1).unwrap())
        .max_retries(64)
        .build();

    let mut codes = HashSet::new();
    for _ in 0..2 {
        codes.insert(generator.generate("https://example.com").unwrap());
    }
    assert_eq!(codes, HashSet::from(["a".to_string(), "b".to_string()]));
    assert!(matches!(
        generator.generate("https://example.com"),
        Err(CodelinkError::GenerationExhausted(_))
    ));
    assert_eq!(store.size(), 2);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_generate_distinct_targets() {
    for store in [
        Arc::new(MemoryStore::new()) as Arc<dyn CodeStore>,
        Arc::new(ShardedStore::new()),
    ] {
        let generator = generator_with(store);
        let before = generator.size();

        let mut handles = Vec::with_capacity(100);
        for i in 0..100 {
            let generator = generator.clone();
            handles.push(tokio::spawn(async move {
                let target = format!("https://example.com/concurrent/{}", i);
                let code = generator.generate(&target).unwrap();
                (code, target)
            }));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            let (code, target) = handle.await.unwrap();
            assert_eq!(generator.resolve(&code).unwrap(), target);
            codes.insert(code);
        }

        assert_eq!(codes.len(), 100);
        assert_eq!(generator.size(), before + 100);
    }
}

#[test]
fn test_concurrent_generate_small_space_never_double_claims() {
    // 字符表很小时大量碰撞，insert_if_absent 保证每个短码只被认领一次
    let store: Arc<dyn CodeStore> = Arc::new(MemoryStore::new());
    let generator = Arc::new(
        CodeGenerator::builder(store.clone())
            .format(CodeFormat::new("abcd", 2).unwrap())
            .max_retries(200)
            .build(),
    );

    let results: Vec<Result<String, CodelinkError>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let generator = generator.clone();
                s.spawn(move || {
                    (0..4)
                        .map(|i| generator.generate(&format!("https://example.com/{}/{}", t, i)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let codes: Vec<String> = results.into_iter().filter_map(Result::ok).collect();
    let distinct: HashSet<&String> = codes.iter().collect();
    assert_eq!(distinct.len(), codes.len());
    assert_eq!(store.size(), codes.len());
    assert!(codes.len() <= 16);
}
