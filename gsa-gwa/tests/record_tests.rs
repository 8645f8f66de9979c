use gsa_gwa::{
    AnalysisMaterial, AnalysisMaterialKind, Axis, AxisKind, AxisRef, EntityList, GwaRegistry,
    LoadGravity, LoadTitle, LoadType, LockType, MassModification, MaterialType, NativeRecord,
    PercentOrAbsolute, Prop2d, PropMass, PropSpring, Reflect, Section, SectionComponent,
    SpringKind, StandardShape, Profile,
};
use pretty_assertions::assert_eq;

fn registry() -> GwaRegistry {
    GwaRegistry::with_defaults()
}

/// Decodes then re-encodes a line, preserving its `SET` prefix.
fn roundtrip(line: &str) -> NativeRecord {
    let registry = registry();
    let record = registry.decode(line).unwrap();
    let encoded = registry.encode(&record, record.set).unwrap();
    assert_eq!(encoded, vec![line.to_string()]);
    record
}

// ── PROP_MASS ────────────────────────────────────────────────────

#[test]
fn prop_mass_percentage_modifiers() {
    let record = roundtrip("PROP_MASS.3:{s1:mass-a}|7|MyMass|NO_RGB|10|1|1|1|0|0|0|NO|10%|10%|10%");
    assert_eq!(record.index, Some(7));
    assert_eq!(record.stream_id(), Some("s1"));
    assert_eq!(record.application_id(), Some("mass-a"));

    let mass = record.as_record::<PropMass>().unwrap();
    assert_eq!(mass.name, "MyMass");
    assert_eq!(mass.mass, 10.0);
    assert_eq!(mass.inertia, [1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
    assert_eq!(mass.modification, MassModification::None);
    assert_eq!(mass.mod_x, Some(PercentOrAbsolute::Percentage(10.0)));
    assert_eq!(mass.mod_z, Some(PercentOrAbsolute::Percentage(10.0)));
}

#[test]
fn prop_mass_absolute_modifiers() {
    let record = roundtrip("PROP_MASS.3:{s1:mass-b}|8|MyMass2|NO_RGB|5|2|2|2|0|0|0|NO|5|5|5");
    let mass = record.as_record::<PropMass>().unwrap();
    assert_eq!(mass.mod_y, Some(PercentOrAbsolute::Absolute(5.0)));
}

#[test]
fn prop_mass_null_modifiers_and_set() {
    let record = roundtrip("SET|PROP_MASS.3|2|Bare|NO_RGB|1|0|0|0|0|0|0|DEFINED");
    assert!(record.set);
    let mass = record.as_record::<PropMass>().unwrap();
    assert_eq!(mass.modification, MassModification::Defined);
    assert_eq!(mass.mod_x, None);
    assert_eq!(mass.mod_y, None);
}

#[test]
fn prop_mass_sentinel_encodes_as_empty() {
    let registry = registry();
    let record = registry
        .decode("PROP_MASS.3|2|M|NO_RGB|1|0|0|0|0|0|0|MOD|UNDEF|5%|UNDEF")
        .unwrap();
    let mass = record.as_record::<PropMass>().unwrap();
    assert_eq!(mass.mod_x, None);
    assert_eq!(mass.mod_y, Some(PercentOrAbsolute::Percentage(5.0)));
    assert_eq!(
        registry.encode(&record, false).unwrap(),
        vec!["PROP_MASS.3|2|M|NO_RGB|1|0|0|0|0|0|0|MOD||5%".to_string()]
    );
}

#[test]
fn prop_mass_modification_tags_are_case_insensitive() {
    let record = registry()
        .decode("PROP_MASS.3|2|M|NO_RGB|1|0|0|0|0|0|0|mod")
        .unwrap();
    let mass = record.as_record::<PropMass>().unwrap();
    assert_eq!(mass.modification, MassModification::Modified);
}

#[test]
fn prop_mass_built_in_code_encodes() {
    let mut mass = PropMass::new("Lump", 2.5);
    mass.mod_x = Some(PercentOrAbsolute::Absolute(1.5));
    let record = NativeRecord::new(mass).with_index(3);
    assert_eq!(
        registry().encode(&record, true).unwrap(),
        vec!["SET|PROP_MASS.3|3|Lump|NO_RGB|2.5|0|0|0|0|0|0|NO|1.5".to_string()]
    );
}

// ── AXIS ─────────────────────────────────────────────────────────

#[test]
fn axis_roundtrip() {
    let record = roundtrip("AXIS.1|1|Local|CART|0|0|0|1|0|0|0|1|0");
    let axis = record.as_record::<Axis>().unwrap();
    assert_eq!(axis.kind, AxisKind::Cartesian);
    assert_eq!(axis.x_vector, [1.0, 0.0, 0.0]);
}

#[test]
fn axis_other_kinds() {
    for tag in ["CYL", "SPH"] {
        roundtrip(&format!("AXIS.1|4|Polar|{tag}|1.5|2|0|1|0|0|0|1|0"));
    }
}

#[test]
fn axis_unknown_type_points_at_token() {
    let err = match registry().decode("AXIS.1|1|A|POLAR|0|0|0|1|0|0|0|1|0") {
        Err(gsa_gwa::GwaError::Decode(err)) => err,
        other => panic!("expected decode error, got {other:?}"),
    };
    assert_eq!(err.keyword, "AXIS");
    assert_eq!(err.token_index, 3);
    assert_eq!(err.token, "POLAR");
}

// ── MAT_ANAL ─────────────────────────────────────────────────────

#[test]
fn material_roundtrip() {
    let record =
        roundtrip("MAT_ANAL.1:{:steel}|1|MAT_ELAS_ISO|Steel|NO_RGB|6|200000000000|0.3|7850|0.000012|0|0");
    let mat = record.as_record::<AnalysisMaterial>().unwrap();
    assert_eq!(mat.kind, AnalysisMaterialKind::ElasticIsotropic);
    assert_eq!(mat.elastic_modulus(), Some(200000000000.0));
    assert_eq!(mat.density(), Some(7850.0));
    assert_eq!(record.stream_id(), None);
    assert_eq!(record.application_id(), Some("steel"));
}

#[test]
fn material_param_count_must_match_model() {
    let result = registry().decode("MAT_ANAL.1|1|MAT_ELAS_ISO|Steel|NO_RGB|3|1|2|3");
    assert!(matches!(result, Err(gsa_gwa::GwaError::Decode(e)) if e.token_index == 5));
}

#[test]
fn material_encode_rejects_wrong_param_length() {
    let mut mat = AnalysisMaterial::isotropic("S", 1.0, 0.3, 7850.0, 0.0);
    mat.params.pop();
    let record = NativeRecord::new(mat).with_index(1);
    assert!(registry().encode(&record, false).is_err());
}

// ── PROP_SPR ─────────────────────────────────────────────────────

#[test]
fn spring_axial_roundtrip() {
    let record = roundtrip("PROP_SPR.4|1|Spring|NO_RGB|AXIAL|1000|0.05");
    let spring = record.as_record::<PropSpring>().unwrap();
    assert_eq!(spring.kind, SpringKind::Axial { stiffness: 1000.0 });
    assert_eq!(spring.damping_ratio, Some(0.05));
}

#[test]
fn spring_variants_roundtrip() {
    roundtrip("PROP_SPR.4|2|T|NO_RGB|TORSIONAL|20");
    roundtrip("PROP_SPR.4|3|C|NO_RGB|COMPRESSION|30");
    roundtrip("PROP_SPR.4|4|T|NO_RGB|TENSION|40");
    roundtrip("PROP_SPR.4|5|G|NO_RGB|GAP|50");
    roundtrip("PROP_SPR.4|6|L|NO_RGB|LOCKUP|60|0.1|-0.1");
    roundtrip("PROP_SPR.4|7|F|NO_RGB|FRICTION|1|2|3|0.3|0.02");
}

#[test]
fn spring_general_with_free_directions() {
    let record = roundtrip("PROP_SPR.4|8|Gen|NO_RGB|GENERAL|10||30|||60|0.1");
    let spring = record.as_record::<PropSpring>().unwrap();
    assert_eq!(
        spring.kind,
        SpringKind::General {
            stiffness: [Some(10.0), None, Some(30.0), None, None, Some(60.0)],
        }
    );
}

#[test]
fn spring_general_all_free_without_damping() {
    let record = roundtrip("PROP_SPR.4|9|Free|NO_RGB|GENERAL");
    let spring = record.as_record::<PropSpring>().unwrap();
    assert_eq!(spring.damping_ratio, None);
}

// ── PROP_2D ──────────────────────────────────────────────────────

#[test]
fn prop_2d_roundtrip() {
    let record = roundtrip(
        "PROP_2D.7:{s:slab-200}|2|Slab 200|NO_RGB|SHELL|GLOBAL|1|CONCRETE|0|0|0.2|CENTROID|0|0|100%|100%|100%|100%",
    );
    let prop = record.as_record::<Prop2d>().unwrap();
    assert_eq!(prop.axis, AxisRef::Global);
    assert_eq!(prop.analysis_material, Some(1));
    assert_eq!(prop.material_type, MaterialType::Concrete);
    assert_eq!(prop.grade, None);
    assert_eq!(prop.thickness, 0.2);
}

#[test]
fn prop_2d_axis_index_and_absolute_modifiers() {
    let record = roundtrip(
        "PROP_2D.7|3|Plate|NO_RGB|PLATE|4|2|STEEL|1|0|0.01|TOP_CENTRE|0.005|12|0.8|1|50%|1",
    );
    let prop = record.as_record::<Prop2d>().unwrap();
    assert_eq!(prop.axis, AxisRef::Axis(4));
    assert_eq!(prop.bending, PercentOrAbsolute::Absolute(0.8));
    assert_eq!(prop.in_plane, PercentOrAbsolute::Percentage(50.0));
}

#[test]
fn prop_2d_axis_zero_means_global() {
    let registry = registry();
    let record = registry
        .decode("PROP_2D.7|3|P|NO_RGB|LOAD|0|0|GENERIC|0|0|0|CENTROID|0|0|1|1|1|1")
        .unwrap();
    assert_eq!(record.as_record::<Prop2d>().unwrap().axis, AxisRef::Global);
    assert_eq!(
        registry.encode(&record, false).unwrap()[0],
        "PROP_2D.7|3|P|NO_RGB|LOAD|GLOBAL|0|GENERIC|0|0|0|CENTROID|0|0|1|1|1|1"
    );
}

// ── SECTION ──────────────────────────────────────────────────────

const SECTION_LINE: &str = "SET|SECTION.7:{s:beam-a}|3|NO_RGB|Beam A|BEAM|0|CEN|0|0|0|1|0|0|0|0|2|SECTION_COMP.4||1|STEEL|1|STD I(mm) 200 100 5 10|0|0|0|NONE|0|NONE|0|SECTION_COMP.4|Flange|1|STEEL|1|CAT UB UB203x133x25|0|0.1|90|Y_AXIS|1|LINEAR|0.5|SECTION_STEEL.2|1|1|1|1|0.4|ROLLED|FLAT|NOT_LOCKED|NO_ENVIRON";

#[test]
fn section_with_embedded_components() {
    let record = roundtrip(SECTION_LINE);
    let section = record.as_record::<Section>().unwrap();
    assert_eq!(section.name, "Beam A");
    assert_eq!(section.components.len(), 2);
    assert_eq!(section.components[0].name, "");
    assert!(matches!(
        section.components[0].profile,
        Profile::Standard { shape: StandardShape::I, .. }
    ));
    assert_eq!(section.components[1].reflect, Reflect::YAxis);
    assert_eq!(section.analysis_materials().collect::<Vec<_>>(), vec![1, 1]);

    let steel = section.steel.as_ref().unwrap();
    assert_eq!(steel.lock, LockType::NotLocked);
    assert_eq!(steel.beta, 0.4);
}

#[test]
fn section_without_steel() {
    let record = roundtrip(
        "SECTION.7|4|NO_RGB|Rect|1D_GENERIC|0|CEN|0|0|0|1|0|0|0|0|1|SECTION_COMP.4||1|CONCRETE|0|STD R(m) 0.5 0.3|0|0|0|NONE|0|NONE|0|ENVIRON",
    );
    let section = record.as_record::<Section>().unwrap();
    assert!(section.steel.is_none());
    assert_eq!(section.components.len(), 1);
}

#[test]
fn section_built_in_code_roundtrips() {
    let component = SectionComponent::new(
        "STD CHS(mm) 100 5".parse().unwrap(),
        MaterialType::Steel,
        Some(2),
    );
    let record = NativeRecord::new(Section::new("Tube", vec![component]))
        .with_index(5)
        .with_application_id("tube");
    let registry = registry();
    let lines = registry.encode(&record, false).unwrap();
    let decoded = registry.decode(&lines[0]).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn section_bad_component_reports_component_keyword() {
    let line = SECTION_LINE.replace("STD I(mm) 200 100 5 10", "STD I(mm) 200");
    let err = match registry().decode(&line) {
        Err(gsa_gwa::GwaError::Decode(err)) => err,
        other => panic!("expected decode error, got {other:?}"),
    };
    assert_eq!(err.keyword, "SECTION_COMP");
    assert_eq!(err.token_index, 21);
}

#[test]
fn section_missing_embedded_header_fails() {
    let line = SECTION_LINE.replacen("SECTION_COMP.4", "SECTION_COMP.3", 1);
    assert!(registry().decode(&line).is_err());
}

// ── LOAD_TITLE / LOAD_GRAVITY ────────────────────────────────────

#[test]
fn load_title_roundtrip() {
    let record = roundtrip("LOAD_TITLE.2:{:dead}|1|Dead load|DEAD|0||NONE|UNDEF");
    let title = record.as_record::<LoadTitle>().unwrap();
    assert_eq!(title.title, "Dead load");
    assert_eq!(title.kind, LoadType::Dead);
    assert_eq!(title.category, "");
}

#[test]
fn load_gravity_roundtrip() {
    let record = roundtrip("LOAD_GRAVITY.3|1|Self weight|all||1|0|0|-1");
    let gravity = record.as_record::<LoadGravity>().unwrap();
    assert_eq!(gravity.elements, EntityList::All);
    assert_eq!(gravity.nodes, EntityList::Empty);
    assert_eq!(gravity.load_case, 1);
    assert_eq!(gravity.gz, -1.0);
}

#[test]
fn load_gravity_with_ranges() {
    roundtrip("LOAD_GRAVITY.3|2|Part|1 to 10 12|3 4|2|0|0.5|-1");
}

#[test]
fn load_gravity_requires_case() {
    let mut gravity = LoadGravity::self_weight("g", 1);
    gravity.load_case = 0;
    let record = NativeRecord::new(gravity).with_index(1);
    assert!(registry().encode(&record, false).is_err());
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn native_record_json_roundtrip() {
    let record = NativeRecord::new(PropSpring::axial("k", 10.0))
        .with_index(2)
        .with_stream_id("s");
    let json = serde_json::to_string(&record).unwrap();
    let back: NativeRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
