//! Macro-generated test suite checking the validators against a backend.
//!
//! The `validator_contract_tests!` macro generates a test module that runs
//! `UniqueValidator` and `MongoIdValidator` over any [`SeedableStore`]
//! implementation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use this_validators::storage::InMemoryDocumentStore;
//!
//! validator_contract_tests!(InMemoryDocumentStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Uniqueness
//! - `test_duplicate_on_other_record_is_flagged`
//! - `test_lone_record_is_unique`
//! - `test_revalidating_stored_record_passes`
//! - `test_case_insensitive_match`
//! - `test_case_sensitive_distinguishes_case`
//! - `test_pattern_characters_are_literal`
//! - `test_search_in_arrays_matches_any_element`
//! - `test_whole_array_match`
//! - `test_case_insensitive_array_match`
//! - `test_criteria_restrict_the_search`
//! - `test_other_collection_and_attribute`
//! - `test_custom_primary_key`
//! - `test_new_record_conflicts_with_any_match`
//! - `test_empty_list_matches_empty_list`
//!
//! ## Identifier casting
//! - `test_cast_then_unique_on_reference`
//! - `test_invalid_reference_never_queries`

/// Generate the validator contract suite for a backend.
///
/// `$factory` must evaluate to a fresh, empty [`SeedableStore`]. It is
/// re-evaluated for each test.
#[macro_export]
macro_rules! validator_contract_tests {
    ($factory:expr) => {
        mod validator_contract_tests {
            use super::*;

            // ==================================================================
            // Uniqueness
            // ==================================================================

            #[tokio::test]
            async fn test_duplicate_on_other_record_is_flagged() {
                init_tracing();
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "jane@example.com")).await.unwrap();
                let ctx = context(store);

                let mut candidate = user_record(ID_B, "jane@example.com");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut candidate, "email")
                    .await
                    .unwrap();

                assert_eq!(
                    candidate.error_messages("email"),
                    vec![r#"Email "jane@example.com" has already been taken."#]
                );
                assert_eq!(candidate.errors()[0].kind, ErrorKind::Duplicate);
            }

            #[tokio::test]
            async fn test_lone_record_is_unique() {
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "jane@example.com")).await.unwrap();
                let ctx = context(store);

                let mut candidate = user_record(ID_B, "john@example.com");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut candidate, "email")
                    .await
                    .unwrap();

                assert!(!candidate.has_errors(None));
            }

            #[tokio::test]
            async fn test_revalidating_stored_record_passes() {
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "jane@example.com")).await.unwrap();
                let ctx = context(store);

                let mut same = user_record(ID_A, "jane@example.com");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut same, "email")
                    .await
                    .unwrap();

                assert!(!same.has_errors(None));
            }

            #[tokio::test]
            async fn test_case_insensitive_match() {
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "Foo")).await.unwrap();
                let ctx = context(store);

                let mut candidate = user_record(ID_B, "foo");
                UniqueValidator::new()
                    .case_sensitive(false)
                    .validate_attribute(&ctx, &mut candidate, "email")
                    .await
                    .unwrap();

                assert!(candidate.has_errors(Some("email")));
            }

            #[tokio::test]
            async fn test_case_sensitive_distinguishes_case() {
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "Foo")).await.unwrap();
                let ctx = context(store);

                let mut candidate = user_record(ID_B, "foo");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut candidate, "email")
                    .await
                    .unwrap();

                assert!(!candidate.has_errors(None));
            }

            #[tokio::test]
            async fn test_pattern_characters_are_literal() {
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "a.c")).await.unwrap();
                store.seed(USERS, user_doc(ID_C, "xabcx")).await.unwrap();
                let ctx = context(store);

                let mut dotted = user_record(ID_B, "abc");
                UniqueValidator::new()
                    .case_sensitive(false)
                    .validate_attribute(&ctx, &mut dotted, "email")
                    .await
                    .unwrap();

                assert!(!dotted.has_errors(None));
            }

            #[tokio::test]
            async fn test_search_in_arrays_matches_any_element() {
                let store = $factory;
                store
                    .seed(
                        USERS,
                        Document::new().with("_id", id(ID_A)).with("tags", vec!["x", "y"]),
                    )
                    .await
                    .unwrap();
                let ctx = context(store);

                let mut candidate = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("tags", vec!["y", "z"]);
                UniqueValidator::new()
                    .search_in_arrays(true)
                    .validate_attribute(&ctx, &mut candidate, "tags")
                    .await
                    .unwrap();

                assert_eq!(
                    candidate.error_messages("tags"),
                    vec![r#"Tags "y, z" has already been taken."#]
                );

                let mut disjoint = Record::new(USERS)
                    .with_attribute("_id", id(ID_C))
                    .with_attribute("tags", vec!["z"]);
                UniqueValidator::new()
                    .search_in_arrays(true)
                    .validate_attribute(&ctx, &mut disjoint, "tags")
                    .await
                    .unwrap();

                assert!(!disjoint.has_errors(None));
            }

            #[tokio::test]
            async fn test_whole_array_match() {
                let store = $factory;
                store
                    .seed(
                        USERS,
                        Document::new().with("_id", id(ID_A)).with("tags", vec!["x", "y"]),
                    )
                    .await
                    .unwrap();
                let ctx = context(store);

                let mut same = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("tags", vec!["x", "y"]);
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut same, "tags")
                    .await
                    .unwrap();
                assert!(same.has_errors(Some("tags")));

                let mut subset = Record::new(USERS)
                    .with_attribute("_id", id(ID_C))
                    .with_attribute("tags", vec!["x"]);
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut subset, "tags")
                    .await
                    .unwrap();
                assert!(!subset.has_errors(None));
            }

            #[tokio::test]
            async fn test_case_insensitive_array_match() {
                let store = $factory;
                store
                    .seed(
                        USERS,
                        Document::new().with("_id", id(ID_A)).with("tags", vec!["Red", "Blue"]),
                    )
                    .await
                    .unwrap();
                let ctx = context(store);

                let mut reordered = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("tags", vec!["blue", "RED"]);
                UniqueValidator::new()
                    .case_sensitive(false)
                    .validate_attribute(&ctx, &mut reordered, "tags")
                    .await
                    .unwrap();
                assert!(reordered.has_errors(Some("tags")));

                let mut longer = Record::new(USERS)
                    .with_attribute("_id", id(ID_C))
                    .with_attribute("tags", vec!["red", "blue", "green"]);
                UniqueValidator::new()
                    .case_sensitive(false)
                    .validate_attribute(&ctx, &mut longer, "tags")
                    .await
                    .unwrap();
                assert!(!longer.has_errors(None));
            }

            #[tokio::test]
            async fn test_criteria_restrict_the_search() {
                let store = $factory;
                store
                    .seed(USERS, user_doc(ID_A, "jane@example.com").with("deleted", true))
                    .await
                    .unwrap();
                let ctx = context(store);

                let validator = UniqueValidator::new()
                    .criteria(Filter::new().with("deleted", Condition::Equals(false.into())));
                let mut candidate = user_record(ID_B, "jane@example.com");
                validator
                    .validate_attribute(&ctx, &mut candidate, "email")
                    .await
                    .unwrap();

                assert!(!candidate.has_errors(None));
            }

            #[tokio::test]
            async fn test_other_collection_and_attribute() {
                let store = $factory;
                store
                    .seed(
                        "accounts",
                        Document::new().with("_id", id(ID_A)).with("login", "jane"),
                    )
                    .await
                    .unwrap();
                let ctx = context(store);

                let mut candidate = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("username", "jane");
                UniqueValidator::new()
                    .collection("accounts")
                    .attribute_name("login")
                    .validate_attribute(&ctx, &mut candidate, "username")
                    .await
                    .unwrap();

                assert!(candidate.has_errors(Some("username")));
            }

            #[tokio::test]
            async fn test_custom_primary_key() {
                let store = $factory;
                store
                    .seed(
                        USERS,
                        Document::new()
                            .with("_id", id(ID_A))
                            .with("code", "FR")
                            .with("name", "France"),
                    )
                    .await
                    .unwrap();
                let ctx = context(store);

                let mut same = Record::new(USERS)
                    .with_primary_key_name("code")
                    .with_attribute("code", "FR")
                    .with_attribute("name", "France");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut same, "name")
                    .await
                    .unwrap();
                assert!(!same.has_errors(None));

                let mut other = Record::new(USERS)
                    .with_primary_key_name("code")
                    .with_attribute("code", "FX")
                    .with_attribute("name", "France");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut other, "name")
                    .await
                    .unwrap();
                assert!(other.has_errors(Some("name")));
            }

            #[tokio::test]
            async fn test_new_record_conflicts_with_any_match() {
                let store = $factory;
                store.seed(USERS, user_doc(ID_A, "jane@example.com")).await.unwrap();
                let ctx = context(store);

                let mut fresh = Record::new(USERS).with_attribute("email", "jane@example.com");
                UniqueValidator::new()
                    .validate_attribute(&ctx, &mut fresh, "email")
                    .await
                    .unwrap();

                assert!(fresh.has_errors(Some("email")));
            }

            #[tokio::test]
            async fn test_empty_list_matches_empty_list() {
                let store = $factory;
                store
                    .seed(
                        USERS,
                        Document::new()
                            .with("_id", id(ID_A))
                            .with("tags", AttributeValue::List(vec![])),
                    )
                    .await
                    .unwrap();
                store
                    .seed(
                        USERS,
                        Document::new().with("_id", id(ID_C)).with("tags", vec!["x"]),
                    )
                    .await
                    .unwrap();
                let ctx = context(store);

                let mut candidate = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("tags", AttributeValue::List(vec![]));
                UniqueValidator::new()
                    .allow_empty(false)
                    .case_sensitive(false)
                    .validate_attribute(&ctx, &mut candidate, "tags")
                    .await
                    .unwrap();

                assert!(candidate.has_errors(Some("tags")));
            }

            // ==================================================================
            // Identifier casting
            // ==================================================================

            #[tokio::test]
            async fn test_cast_then_unique_on_reference() {
                let store = $factory;
                store
                    .seed(
                        USERS,
                        Document::new().with("_id", id(ID_A)).with("owner_id", id(ID_C)),
                    )
                    .await
                    .unwrap();
                let pipeline = ValidationPipeline::new(context(store))
                    .with_rule(["owner_id"], MongoIdValidator::new())
                    .with_rule(["owner_id"], UniqueValidator::new());

                let mut candidate = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("owner_id", ID_C);
                let valid = pipeline.validate(&mut candidate).await.unwrap();

                assert!(!valid);
                assert_eq!(
                    candidate.get_attribute("owner_id"),
                    AttributeValue::Identifier(id(ID_C))
                );
                assert_eq!(candidate.errors()[0].kind, ErrorKind::Duplicate);
            }

            #[tokio::test]
            async fn test_invalid_reference_never_queries() {
                let store = $factory;
                let pipeline = ValidationPipeline::new(context(store))
                    .with_rule(["owner_id"], MongoIdValidator::new())
                    .with_rule(["owner_id"], UniqueValidator::new());

                let mut candidate = Record::new(USERS)
                    .with_attribute("_id", id(ID_B))
                    .with_attribute("owner_id", "not-an-id");
                let valid = pipeline.validate(&mut candidate).await.unwrap();

                assert!(!valid);
                assert_eq!(candidate.errors().len(), 1);
                assert_eq!(candidate.errors()[0].kind, ErrorKind::InvalidIdentifier);
                assert_eq!(candidate.get_attribute("owner_id"), "not-an-id".into());
            }
        }
    };
}
