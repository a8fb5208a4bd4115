#![cfg(test)]
// This is meant to mirror as closely as possible, how users should use the crate

use std::sync::Arc;
use crate::prelude::*;
use crate::query::{self, mask_for, predicate};

const MEDIUM: [&str; 4] = ["web", "print", "email", "phone"];

// Custom capability, only available on the `misc` attribute
struct Worked;

impl Capability for Worked {
	const NAME: &'static str = "worked";
}

trait WorkedExt {
	fn worked(&self) -> bool;
}

impl WorkedExt for BitmaskValueSet<Worked> {
	fn worked(&self) -> bool {
		true
	}
}

// A hand-written record type, the way an integrator would declare one
struct Campaign {
	medium: BitmaskValueSet,
	misc: BitmaskValueSet<Worked>,
}

impl Campaign {
	fn new(schema: &Schema) -> InternalResult<Campaign> {
		Ok(Campaign {
			medium: BitmaskValueSet::empty(schema.registry("medium")?.clone()),
			misc: BitmaskValueSet::empty(schema.registry("misc")?.clone()),
		})
	}
}

fn campaign_schema(nullable: bool) -> Arc<Schema> {
	let config = AttributeConfig::default().nullable(nullable);

	let schema = Schema::builder("Campaign")
		.attribute_with("medium", MEDIUM, config.clone())
		.attribute_with("misc", ["foo", "bar"], config.clone())
		.attribute_with("Legacy", ["upper", "case"], config)
		.build()
		.unwrap();

	Arc::new(schema)
}

// Both column flavours, NULL-able and NOT NULL
fn contexts() -> [Arc<Schema>; 2] {
	[campaign_schema(true), campaign_schema(false)]
}

fn medium(schema: &Schema) -> Arc<BitmaskRegistry> {
	registry_of(schema, "medium")
}

fn registry_of(schema: &Schema, attribute: &str) -> Arc<BitmaskRegistry> {
	schema.registry(attribute).unwrap().clone()
}

fn assert_stored(schema: &Schema, set: &BitmaskValueSet, values: &[&str]) {
	for value in values {
		assert!(set.contains(value), "Values {} do not include {}", set, value);
	}

	let full_mask = values
		.iter()
		.fold(0, |mask, value| mask | schema.bitmask("medium", value).unwrap());

	assert_eq!(set.to_integer(), full_mask);
	assert_eq!(set.len(), values.len());
}

#[test]
fn values_for_attribute() -> InternalResult {
	for schema in contexts() {
		let values = schema.values_for("medium")?;
		assert_eq!(values, MEDIUM.as_slice());
	}

	Ok(())
}

#[test]
fn independent_bit_spaces() -> InternalResult {
	let schema = campaign_schema(false);

	assert_eq!(schema.bitmask("medium", "web")?, 1);
	assert_eq!(schema.bitmask("medium", "phone")?, 8);
	assert_eq!(schema.bitmask("misc", "foo")?, 1);
	assert_eq!(schema.bitmask("Legacy", "case")?, 2);

	let bitmasks = schema.bitmasks();
	assert_eq!(bitmasks["medium"]["email"], 4);
	assert_eq!(bitmasks["misc"]["bar"], 2);

	Ok(())
}

#[test]
fn assign_single_value() -> InternalResult {
	for schema in contexts() {
		let set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web"])?;
		assert_stored(&schema, &set, &["web"]);
	}

	Ok(())
}

#[test]
fn assign_multiple_values() -> InternalResult {
	for schema in contexts() {
		let set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;
		assert_stored(&schema, &set, &["web", "print"]);
	}

	Ok(())
}

#[test]
fn add_single_value() -> InternalResult {
	for schema in contexts() {
		let mut set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;
		assert_stored(&schema, &set, &["web", "print"]);

		assert!(set.add("phone")?);
		assert_stored(&schema, &set, &["web", "print", "phone"]);
	}

	Ok(())
}

#[test]
fn duplicate_adds_are_ignored() -> InternalResult {
	for schema in contexts() {
		let mut set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;

		assert!(set.add("phone")?);
		assert_stored(&schema, &set, &["web", "print", "phone"]);

		assert!(!set.add("phone")?);
		assert_stored(&schema, &set, &["web", "print", "phone"]);

		// A different representation of the same value
		assert!(!set.add(String::from("phone"))?);
		assert!(!set.add(Symbol::from("phone"))?);
		assert_stored(&schema, &set, &["web", "print", "phone"]);

		assert_eq!(set.iter().filter(|value| value.as_str() == "phone").count(), 1);
	}

	Ok(())
}

#[test]
fn duplicate_values_collapse() -> InternalResult {
	let schema = campaign_schema(false);
	let set: BitmaskValueSet = BitmaskValueSet::from_values(
		medium(&schema),
		vec!["phone".to_string(), "phone".to_string(), "phone".to_string()],
	)?;

	assert_eq!(set.len(), 1);
	assert_eq!(set.to_vec(), vec![Symbol::from("phone")]);
	Ok(())
}

#[test]
fn replace_all_values() -> InternalResult {
	for schema in contexts() {
		let mut set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;
		assert_stored(&schema, &set, &["web", "print"]);

		set.replace(["phone", "email"])?;
		assert_stored(&schema, &set, &["phone", "email"]);
	}

	Ok(())
}

#[test]
fn replace_is_not_additive() -> InternalResult {
	let schema = campaign_schema(false);
	let mut set: BitmaskValueSet = BitmaskValueSet::empty(medium(&schema));

	set.add("web")?;
	set.add("print")?;
	set.replace(["phone"])?;

	assert_eq!(set.to_vec(), vec![Symbol::from("phone")]);
	assert_eq!(set.to_integer(), 8);
	Ok(())
}

#[test]
fn remove_value() -> InternalResult {
	let schema = campaign_schema(false);
	let mut set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;

	assert!(set.remove("web")?);
	assert!(!set.remove("web")?);
	assert_stored(&schema, &set, &["print"]);

	let error = set.remove("fax").unwrap_err();
	assert!(error.is_unsupported_value());
	assert_stored(&schema, &set, &["print"]);

	set.clear();
	assert!(set.is_empty());
	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn save_and_load_transparently() -> InternalResult {
	for schema in contexts() {
		let store = MemoryStore::new();

		let mut campaign = Record::new(schema.clone());
		campaign.assign("medium", ["web", "print"])?;
		assert_stored(&schema, campaign.get("medium")?, &["web", "print"]);

		let id = campaign.save(&store)?;
		assert_eq!(campaign.id(), Some(id));

		let row = store.find(id).unwrap();
		let loaded = Record::load(schema.clone(), &row);
		assert_stored(&schema, loaded.get("medium")?, &["web", "print"]);
	}

	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn empty_sets_persist_per_nullability() -> InternalResult {
	let nullable = Record::new(campaign_schema(true));
	let not_null = Record::new(campaign_schema(false));

	assert!(nullable.columns().iter().all(|(_, value)| value.is_none()));
	assert!(not_null.columns().iter().all(|(_, value)| *value == Some(0)));

	let store = MemoryStore::new();
	let id = nullable.clone().save(&store)?;
	let row = store.find(id).unwrap();

	assert!(row.is_null("medium"));
	assert!(Record::load(campaign_schema(true), &row).get("medium")?.is_empty());
	Ok(())
}

#[test]
fn custom_capability_is_per_attribute() -> InternalResult {
	let schema = campaign_schema(false);
	let mut campaign = Campaign::new(&schema)?;

	campaign.medium.replace(["web", "print"])?;
	campaign.misc.add("foo")?;

	// `campaign.medium.worked()` does not compile, the capability belongs to `misc` alone
	assert!(campaign.misc.worked());
	assert!(format!("{:?}", campaign.misc).starts_with("BitmaskValueSet<worked>[misc]"));
	assert!(format!("{:?}", campaign.medium).starts_with("BitmaskValueSet<plain>[medium]"));
	Ok(())
}

#[test]
fn unsupported_values_are_rejected() -> InternalResult {
	for schema in contexts() {
		let registry = medium(&schema);

		let error = BitmaskValueSet::<Plain>::from_values(registry.clone(), ["web", "print", "this_will_fail"]).unwrap_err();
		assert!(matches!(error, InternalError::UnsupportedValueError { ref value, .. } if value == "this_will_fail"));

		let mut set: BitmaskValueSet = BitmaskValueSet::from_values(registry, ["web"])?;

		assert!(set.add("this_will_fail_also").unwrap_err().is_unsupported_value());
		assert_stored(&schema, &set, &["web"]);

		assert!(set.replace(["so_will_this"]).unwrap_err().is_unsupported_value());
		assert_stored(&schema, &set, &["web"]);

		// Nothing is applied when one entry out of many is bad
		assert!(set.add_all(["print", "nope"]).is_err());
		assert_stored(&schema, &set, &["web"]);

		let mut campaign = Record::new(schema.clone());
		assert!(campaign.assign("medium", ["web", "nope"]).unwrap_err().is_unsupported_value());
		assert!(campaign.get("medium")?.is_empty());
	}

	Ok(())
}

#[test]
fn bitmask_convenience_method() -> InternalResult {
	for schema in contexts() {
		let mask = schema.bitmask_for("medium", ["web", "print"])?;
		assert_eq!(mask, schema.bitmask("medium", "web")? | schema.bitmask("medium", "print")?);
		assert_eq!(mask_for(&medium(&schema), ["web", "print"])?, 0b11);
	}

	Ok(())
}

#[test]
fn unknown_value_in_convenience_method() {
	for schema in contexts() {
		let error = schema.bitmask_for("medium", ["web", "and_this_isnt_valid"]).unwrap_err();
		assert!(error.is_unsupported_value());

		let error = mask_for(&medium(&schema), ["web", "unknown"]).unwrap_err();
		assert!(error.is_unsupported_value());
	}
}

#[test]
fn values_with_indifferent_access() -> InternalResult {
	let schema = campaign_schema(false);

	let from_strings = schema.bitmask_for("medium", vec![String::from("web"), String::from("print")])?;
	let from_symbols = schema.bitmask_for("medium", [Symbol::from("web"), Symbol::from("print")])?;

	assert_eq!(schema.bitmask_for("medium", ["web", "print"])?, from_strings);
	assert_eq!(from_strings, from_symbols);
	Ok(())
}

#[test]
fn identity_is_case_sensitive() {
	let schema = campaign_schema(false);

	assert!(schema.bitmask("medium", "Web").unwrap_err().is_unsupported_value());
	assert!(schema.bitmask("Legacy", "upper").is_ok());
	assert!(schema.registry("legacy").is_err());
}

#[cfg(feature = "store")]
#[test]
fn non_standard_attribute_names() -> InternalResult {
	for schema in contexts() {
		let store = MemoryStore::new();

		let mut campaign = Record::new(schema.clone());
		campaign.assign("Legacy", ["upper", "case"])?;
		let id = campaign.save(&store)?;

		let loaded = Record::load(schema.clone(), &store.find(id).unwrap());
		assert_eq!(loaded.get("Legacy")?.to_vec(), vec![Symbol::from("upper"), Symbol::from("case")]);
	}

	Ok(())
}

#[test]
fn custom_columns() -> InternalResult {
	let schema = Schema::builder("Campaign")
		.attribute_with("medium", MEDIUM, AttributeConfig::default().column("medium_flags"))
		.build()?;

	let registry = schema.registry("medium")?;
	assert_eq!(registry.column(), "medium_flags");
	assert_eq!(query::no(registry).sql_condition(), r#"("medium_flags" IS NULL OR "medium_flags" = 0)"#);

	let mut campaign = Record::new(Arc::new(schema));
	campaign.assign("medium", ["email"])?;
	let expected: Columns = vec![(Arc::from("medium_flags"), Some(4))];
	assert_eq!(campaign.columns(), expected);
	Ok(())
}

#[test]
fn blanks_are_ignored() -> InternalResult {
	for schema in contexts() {
		let set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print", ""])?;
		assert_stored(&schema, &set, &["web", "print"]);
		assert_eq!(set.to_integer(), 0b11);

		let mut set = set;
		assert!(!set.add("  ")?);
		assert_stored(&schema, &set, &["web", "print"]);
	}

	Ok(())
}

#[test]
fn checking_single_values() -> InternalResult {
	let schema = campaign_schema(false);
	let set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;

	// Generated accessors
	let stored = set.to_integer();
	assert!(schema.accessor("medium_for_web").unwrap().test(stored));
	assert!(schema.accessor("medium_for_print").unwrap().test(stored));
	assert!(!schema.accessor("medium_for_email").unwrap().test(stored));
	assert!(schema.accessor("medium_for_fax").is_none());

	// Simple predicate
	assert!(set.contains("web"));
	assert!(set.contains("print"));
	assert!(!set.contains("email"));
	assert!(!set.contains("fax"));
	Ok(())
}

#[test]
fn checking_multiple_values() -> InternalResult {
	let schema = campaign_schema(false);
	let set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;

	assert!(set.contains_all(["web", "print"]));
	assert!(!set.contains_all(["web", "email"]));
	assert!(!set.contains_all(["web", "fax"]));
	Ok(())
}

#[test]
fn at_least_one_value_set() -> InternalResult {
	let schema = campaign_schema(false);

	let set: BitmaskValueSet = BitmaskValueSet::from_values(medium(&schema), ["web", "print"])?;
	assert!(set.any_set());

	let set: BitmaskValueSet = BitmaskValueSet::empty(medium(&schema));
	assert!(!set.any_set());

	// Undeclared bits alone are no values
	let set: BitmaskValueSet = BitmaskValueSet::from_integer(medium(&schema), 0b10000);
	assert!(!set.any_set());
	Ok(())
}

#[test]
fn integer_round_trip() {
	let schema = campaign_schema(false);
	let registry = medium(&schema);

	for n in [0u64, 1, 3, 5, 0b1111, 0b10000, 0b10101, u64::MAX >> 2, u64::MAX] {
		let set: BitmaskValueSet = BitmaskValueSet::from_integer(registry.clone(), n);
		assert_eq!(set.to_integer(), n);
	}
}

#[test]
fn undeclared_bits_survive_mutation() -> InternalResult {
	let schema = campaign_schema(false);
	let mut set: BitmaskValueSet = BitmaskValueSet::from_integer(medium(&schema), 0b10000);

	assert!(set.is_empty());
	assert_eq!(set.undeclared_bits(), 0b10000);

	set.add("web")?;
	assert_eq!(set.to_integer(), 0b10001);
	assert_eq!(set.to_vec(), vec![Symbol::from("web")]);

	set.remove("web")?;
	assert_eq!(set.to_integer(), 0b10000);

	// Wholesale assignment starts from scratch
	set.replace(["print"])?;
	assert_eq!(set.to_integer(), 0b10);
	Ok(())
}

#[test]
fn decode_in_declaration_order() {
	let schema = campaign_schema(false);
	let set: BitmaskValueSet = BitmaskValueSet::from_integer(medium(&schema), 0b1101);

	assert_eq!(set.to_vec(), vec![Symbol::from("web"), Symbol::from("email"), Symbol::from("phone")]);
	assert_eq!(set.to_string(), "[web, email, phone]");
}

#[test]
fn predicate_rules() -> InternalResult {
	let schema = campaign_schema(false);
	let registry = medium(&schema);
	let stored = [3u64, 0, 5];

	let matching = |predicate: &Predicate| stored.iter().map(|s| predicate.matches(*s)).collect::<Vec<_>>();

	let all = predicate(&registry, Rule::All, ["web", "print"])?;
	assert_eq!(matching(&all), [true, false, false]);

	let has_any = predicate(&registry, Rule::HasAny, ["print", "email"])?;
	assert_eq!(matching(&has_any), [true, false, true]);

	let none = predicate(&registry, Rule::None, [] as [&str; 0])?;
	assert_eq!(matching(&none), [false, true, false]);

	let none_of = predicate(&registry, Rule::None, ["print"])?;
	assert_eq!(matching(&none_of), [false, true, true]);

	let any = predicate(&registry, Rule::Any, [] as [&str; 0])?;
	assert_eq!(matching(&any), [true, false, true]);

	// Any with values is an OR
	let any_of = predicate(&registry, Rule::Any, ["email"])?;
	assert_eq!(any_of.rule(), Rule::HasAny);
	assert_eq!(matching(&any_of), [false, false, true]);

	assert!(predicate(&registry, Rule::All, ["web", "fax"]).unwrap_err().is_unsupported_value());
	Ok(())
}

#[test]
fn predicate_sql_conditions() -> InternalResult {
	let schema = campaign_schema(true);
	let registry = medium(&schema);

	assert_eq!(query::with(&registry, ["web", "print"])?.sql_condition(), r#""medium" & 3 = 3"#);
	assert_eq!(query::with(&registry, [] as [&str; 0])?.sql_condition(), r#""medium" <> 0"#);
	assert_eq!(query::with_any(&registry, ["print", "email"])?.sql_condition(), r#""medium" & 6 <> 0"#);
	assert_eq!(query::without(&registry, ["print"])?.sql_condition(), r#"("medium" IS NULL OR "medium" & 2 = 0)"#);

	let legacy = schema.registry("Legacy")?;
	let filter = Filter::from(query::with(&registry, ["web"])?).and(query::no(legacy));
	assert_eq!(
		filter.sql_condition(),
		r#""medium" & 1 = 1 AND ("Legacy" IS NULL OR "Legacy" = 0)"#
	);
	assert_eq!(Filter::new().sql_condition(), "1 = 1");
	Ok(())
}

// Seeds the store with the named scope fixtures: [web, print], nothing, [web, email]
#[cfg(feature = "store")]
fn seed_campaigns(schema: &Arc<Schema>, store: &MemoryStore) -> InternalResult<[u64; 3]> {
	let mut first = Record::new(schema.clone());
	first.assign("medium", ["web", "print"])?;

	let mut second = Record::new(schema.clone());

	let mut third = Record::new(schema.clone());
	third.assign("medium", ["web", "email"])?;

	Ok([first.save(store)?, second.save(store)?, third.save(store)?])
}

#[cfg(feature = "store")]
fn ids(rows: Vec<Row>) -> Vec<u64> {
	rows.into_iter().map(|row| row.id).collect()
}

#[cfg(feature = "store")]
#[test]
fn named_scopes() -> InternalResult {
	for schema in contexts() {
		let store = MemoryStore::new();
		let [c1, c2, c3] = seed_campaigns(&schema, &store)?;
		let registry = medium(&schema);

		let scope = |predicate: Predicate| ids(store.filter(&Filter::from(predicate)));

		// retrieval by any value
		assert_eq!(scope(query::with(&registry, [] as [&str; 0])?), [c1, c3]);
		// retrieval by one matching value
		assert_eq!(scope(query::with(&registry, ["print"])?), [c1]);
		// retrieval by any matching value (OR)
		assert_eq!(scope(query::with_any(&registry, ["print", "email"])?), [c1, c3]);
		// retrieval by all matching values
		assert_eq!(scope(query::with(&registry, ["web", "print"])?), [c1]);
		assert_eq!(scope(query::with(&registry, ["web", "email"])?), [c3]);
		// retrieval for no values
		assert_eq!(scope(query::without(&registry, [] as [&str; 0])?), [c2]);
		assert_eq!(scope(query::no(&registry)), [c2]);
		// retrieval without a specific value
		assert_eq!(scope(query::without(&registry, ["print"])?), [c2, c3]);

		store.delete_all();
		assert!(store.is_empty());
	}

	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn chained_filters() -> InternalResult {
	let schema = campaign_schema(false);
	let store = MemoryStore::new();
	let [c1, _, c3] = seed_campaigns(&schema, &store)?;
	let registry = medium(&schema);

	let filter = Filter::new()
		.and(query::with(&registry, ["web"])?)
		.and(query::with_any(&registry, ["email", "phone"])?);
	assert_eq!(ids(store.filter(&filter)), [c3]);

	let filter = Filter::new()
		.and(query::with(&registry, ["web"])?)
		.and(query::without(&registry, ["email"])?);
	assert_eq!(ids(store.filter(&filter)), [c1]);

	assert_eq!(store.filter(&Filter::new()).len(), 3);
	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn find_by_accessor_scopes() -> InternalResult {
	for schema in contexts() {
		let store = MemoryStore::new();

		let mut campaign = Record::new(schema.clone());
		campaign.assign("medium", ["web", "print"])?;
		let id = campaign.save(&store)?;

		let for_print = schema.accessor("medium_for_print").unwrap().predicate();
		let for_web = schema.accessor("medium_for_web").unwrap().predicate();
		let for_email = schema.accessor("medium_for_email").unwrap().predicate();

		let manual = Filter::from(query::with_any(&medium(&schema), ["print"])?);
		assert_eq!(ids(store.filter(&manual)), ids(store.filter(&Filter::from(for_print.clone()))));

		let chained = Filter::from(for_print).and(for_web.clone());
		assert_eq!(ids(store.filter(&chained)), [id]);

		// Nobody stores email
		assert!(store.filter(&Filter::from(for_email.clone())).is_empty());
		assert!(store.filter(&Filter::from(for_web).and(for_email)).is_empty());
	}

	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn find_no_values() -> InternalResult {
	for schema in contexts() {
		let store = MemoryStore::new();
		let registry = medium(&schema);
		let no_medium = Filter::from(query::no(&registry));

		let mut campaign = Record::new(schema.clone());
		campaign.assign("medium", ["web", "print"])?;
		let id = campaign.save(&store)?;

		assert!(store.filter(&no_medium).is_empty());

		campaign.assign("medium", [] as [&str; 0])?;
		assert_eq!(campaign.save(&store)?, id);

		assert_eq!(ids(store.filter(&no_medium)), [id]);
	}

	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn update_missing_record() {
	let store = MemoryStore::new();
	let error = store.update(42, vec![]).unwrap_err();
	assert!(matches!(error, InternalError::MissingRecordError(42)));
}

#[test]
fn schema_declaration_errors() {
	let empty = BitmaskRegistry::declare("medium", [] as [&str; 0]).unwrap_err();
	assert!(matches!(empty, InternalError::EmptyDeclarationError(_)));

	let duplicate = BitmaskRegistry::declare("medium", ["web", "print", "web"]).unwrap_err();
	assert!(matches!(duplicate, InternalError::DuplicateValueError { ref value, .. } if value == "web"));

	let blank = BitmaskRegistry::declare("medium", ["web", ""]).unwrap_err();
	assert!(matches!(blank, InternalError::BlankValueError(_)));

	let invalid = BitmaskRegistry::declare_with("medium", MEDIUM, &AttributeConfig::default().bit_width(0)).unwrap_err();
	assert!(matches!(invalid, InternalError::InvalidBitWidthError(_, 0)));

	let too_wide = BitmaskRegistry::declare_with("medium", MEDIUM, &AttributeConfig::default().bit_width(65)).unwrap_err();
	assert!(too_wide.is_schema_error());

	let overflow = BitmaskRegistry::declare_with("medium", MEDIUM, &AttributeConfig::default().bit_width(3)).unwrap_err();
	assert!(matches!(overflow, InternalError::BitWidthOverflowError { count: 4, width: 3, .. }));

	let attribute = Schema::builder("Campaign")
		.attribute("medium", MEDIUM)
		.attribute("medium", ["foo"])
		.build()
		.unwrap_err();
	assert!(matches!(attribute, InternalError::DuplicateAttributeError { .. }));

	// "a" + "for_b" and "a_for" + "b" both generate `a_for_for_b`
	let accessor = Schema::builder("Clash")
		.attribute("a", ["for_b"])
		.attribute("a_for", ["b"])
		.build()
		.unwrap_err();
	assert!(matches!(accessor, InternalError::DuplicateAccessorError(ref name) if name == "a_for_for_b"));

	// Two attributes packed into one column would overwrite each other on save
	let shared = Schema::builder("Campaign")
		.attribute_with("medium", MEDIUM, AttributeConfig::default().column("flags"))
		.attribute_with("misc", ["foo", "bar"], AttributeConfig::default().column("flags"))
		.build()
		.unwrap_err();
	assert!(matches!(
		shared,
		InternalError::DuplicateColumnError { ref column, ref first, ref second }
			if column == "flags" && first == "medium" && second == "misc"
	));

	// A custom column may still collide with another attribute's default column
	let shadowed = Schema::builder("Campaign")
		.attribute("misc", ["foo", "bar"])
		.attribute_with("medium", MEDIUM, AttributeConfig::default().column("misc"))
		.build()
		.unwrap_err();
	assert!(matches!(shadowed, InternalError::DuplicateColumnError { .. }));

	for error in [empty, duplicate, blank, invalid, overflow, attribute, accessor, shared, shadowed] {
		assert!(error.is_schema_error());
		assert!(!error.is_unsupported_value());
	}
}

#[test]
fn bit_width_limits() -> InternalResult {
	let names: Vec<String> = (0..64).map(|i| format!("flag_{}", i)).collect();

	// 62 fit by default, 63 don't
	assert!(BitmaskRegistry::declare("flags", &names[..62]).is_ok());
	assert!(BitmaskRegistry::declare("flags", &names[..63]).is_err());

	let full = BitmaskRegistry::declare_with("flags", &names, &AttributeConfig::default().bit_width(64))?;
	assert_eq!(full.bit_for("flag_63")?, 1 << 63);
	assert_eq!(full.declared_mask(), u64::MAX);

	// The sign bit renders as a signed 64-bit literal
	let top = query::with(&full, ["flag_63"])?;
	assert_eq!(top.sql_condition(), r#""flags" & -9223372036854775808 = -9223372036854775808"#);
	assert!(top.matches(1 << 63));

	let set: BitmaskValueSet = BitmaskValueSet::from_integer(Arc::new(full), u64::MAX);
	assert_eq!(set.len(), 64);
	assert_eq!(set.undeclared_bits(), 0);
	Ok(())
}

#[test]
fn unknown_attribute() {
	let schema = campaign_schema(false);

	let error = schema.registry("colour").unwrap_err();
	assert!(matches!(error, InternalError::UnknownAttributeError { ref attribute, .. } if attribute == "colour"));
	assert!(Record::new(schema).get("colour").is_err());
}

#[test]
fn shared_registry_across_threads() {
	use rayon::prelude::*;

	let schema = campaign_schema(false);
	let registry = medium(&schema);

	let total: u64 = (0u64..256)
		.into_par_iter()
		.map(|n| {
			let mut set: BitmaskValueSet = BitmaskValueSet::from_integer(registry.clone(), n);
			set.add("phone").unwrap();
			assert!(set.contains("phone"));
			set.to_integer()
		})
		.sum();

	let expected: u64 = (0u64..256).map(|n| n | 8).sum();
	assert_eq!(total, expected);
}

#[test]
fn record_sets_carry_capabilities() -> InternalResult {
	let schema = campaign_schema(false);
	let mut campaign = Record::new(schema.clone());
	campaign.assign("medium", ["web"])?;

	let mut misc: BitmaskValueSet<Worked> = campaign.get_as("misc")?;
	assert!(misc.worked());
	misc.add("bar")?;

	// Write back through the capability, the record sees the new value
	campaign.put(misc)?;
	assert!(campaign.get("misc")?.contains("bar"));

	// `medium` is untouched and stays plain
	let medium = campaign.get("medium")?;
	assert_eq!(medium.to_vec(), ["web"]);
	assert!(format!("{:?}", medium).starts_with("BitmaskValueSet<plain>[medium]"));

	// Sets from a different schema are refused
	let other = campaign_schema(false);
	let stranger: BitmaskValueSet<Worked> = BitmaskValueSet::from_integer(registry_of(&other, "misc"), 0b1);
	assert!(matches!(campaign.put(stranger), Err(InternalError::UnknownAttributeError { .. })));
	assert!(campaign.get("misc")?.contains("bar"));
	Ok(())
}

#[test]
fn capability_views_share_bits() -> InternalResult {
	let schema = campaign_schema(false);
	let registry = medium(&schema);

	// Undeclared bits travel with the view
	let plain: BitmaskValueSet = BitmaskValueSet::from_integer(registry, 0b1_0001);
	let worked = plain.with_capability::<Worked>();

	assert_eq!(worked.to_integer(), plain.to_integer());
	assert_eq!(worked.undeclared_bits(), 0b1_0000);
	assert!(Arc::ptr_eq(worked.registry(), plain.registry()));

	let back: BitmaskValueSet = worked.into_capability();
	assert_eq!(back, plain);
	Ok(())
}

#[cfg(feature = "store")]
#[test]
fn shared_store_assigns_unique_ids() -> InternalResult {
	use rayon::prelude::*;

	let schema = campaign_schema(false);
	let store = MemoryStore::new();

	let mut ids = (0..128)
		.into_par_iter()
		.map(|_| Record::new(schema.clone()).save(&store))
		.collect::<InternalResult<Vec<u64>>>()?;

	ids.sort_unstable();
	assert_eq!(ids, (1..=128).collect::<Vec<u64>>());
	assert_eq!(store.len(), 128);
	Ok(())
}
