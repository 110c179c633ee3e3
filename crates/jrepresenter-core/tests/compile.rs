use jrepresenter_core::ir::{Expr, FunctionKind, Stmt, ValueType, Var};
use jrepresenter_core::{
    Attribute, AttributeMapping, DescriptorRegistry, DescriptorSet, Error, MappingCompiler,
    RepresenterDescriptor, RepresenterId, SubclassDispatch, TypeRef,
};

fn user() -> RepresenterDescriptor {
    RepresenterDescriptor::parse("com.foo.representers.UserRepresenter", "com.foo.User").unwrap()
}

fn fname(embedded: bool) -> AttributeMapping {
    AttributeMapping::property(
        Attribute::typed("fname", "java.lang.String").unwrap(),
        Attribute::typed("firstName", "java.lang.String").unwrap(),
    )
    .embedded(embedded)
}

fn user_compiler(mappings: Vec<AttributeMapping>) -> MappingCompiler {
    let mut registry = DescriptorRegistry::new();
    registry.register(user()).unwrap();
    for mapping in mappings {
        registry.add_attribute(user().id(), mapping);
    }
    MappingCompiler::with_defaults(registry.freeze())
}

/// Keys written by `toJSON` into `target`, in order
fn put_keys(body: &[Stmt], target: Var) -> Vec<String> {
    body.iter()
        .filter_map(|stmt| match stmt {
            Stmt::Put { target: t, key, .. } if *t == target => Some(key.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_flat_property_writes_and_reads_wire_key() -> anyhow::Result<()> {
    let compiler = user_compiler(vec![fname(false)]);
    let unit = compiler.compile(&user())?;
    assert_eq!(unit.mapper.to_string(), "gen.com.foo.representers.UserMapper");

    let to_json = unit.function(FunctionKind::ToJson).unwrap();
    assert_eq!(put_keys(&to_json.body, Var::Json), vec!["first_name"]);
    assert!(!put_keys(&to_json.body, Var::Json).contains(&"_embedded".to_string()));

    let from_json = unit.function(FunctionKind::FromJson).unwrap();
    let guarded = from_json.body.iter().any(|stmt| {
        matches!(stmt, Stmt::If { condition: Expr::HasKey { container: Var::Json, key }, then }
            if key == "first_name"
                && matches!(&then[0], Stmt::SetAttribute { attribute, value: Expr::Cast { target: ValueType::Declared(ty), .. }, .. }
                    if attribute.name() == "fname" && ty.simple_name() == "String"))
    });
    assert!(guarded);
    Ok(())
}

#[test]
fn test_embedded_property_goes_under_embedded_key() -> anyhow::Result<()> {
    let compiler = user_compiler(vec![fname(true)]);
    let unit = compiler.compile(&user())?;
    let to_json = unit.function(FunctionKind::ToJson).unwrap();

    assert_eq!(put_keys(&to_json.body, Var::Json), vec!["_embedded"]);
    assert_eq!(put_keys(&to_json.body, Var::EmbeddedMap), vec!["first_name"]);

    let from_json = unit.function(FunctionKind::FromJson).unwrap();
    assert!(from_json.body.iter().any(|stmt| matches!(
        stmt,
        Stmt::Declare { var: Var::EmbeddedMap, init: Expr::SubContainer { key, .. }, .. } if key == "_embedded"
    )));
    Ok(())
}

#[test]
fn test_emission_order_follows_declaration_with_embedded_last() -> anyhow::Result<()> {
    let attr = |name: &str| Attribute::untyped(name).unwrap();
    let compiler = user_compiler(vec![
        AttributeMapping::property(attr("lastName"), attr("lastName")),
        AttributeMapping::property(attr("nickname"), attr("nickname")).embedded(true),
        AttributeMapping::property(attr("age"), attr("age")),
        AttributeMapping::property(attr("email"), attr("email")),
    ]);
    let unit = compiler.compile(&user())?;
    let to_json = unit.function(FunctionKind::ToJson).unwrap();
    assert_eq!(
        put_keys(&to_json.body, Var::Json),
        vec!["last_name", "age", "email", "_embedded"]
    );
    Ok(())
}

#[test]
fn test_skip_flags_remove_their_pair() -> anyhow::Result<()> {
    for (skip_serialize, skip_deserialize) in [(true, false), (false, true), (true, true)] {
        let descriptor = user()
            .skip_serialize(skip_serialize)
            .skip_deserialize(skip_deserialize);
        let mut registry = DescriptorRegistry::new();
        registry.register(descriptor.clone())?;
        let unit = MappingCompiler::with_defaults(registry.freeze()).compile(&descriptor)?;

        assert_eq!(unit.has_function(FunctionKind::ToJson), !skip_serialize);
        assert_eq!(unit.has_function(FunctionKind::ToJsonCollection), !skip_serialize);
        assert_eq!(unit.has_function(FunctionKind::FromJson), !skip_deserialize);
        assert_eq!(unit.has_function(FunctionKind::FromJsonCollection), !skip_deserialize);
    }
    Ok(())
}

#[test]
fn test_unknown_nested_representer_names_both_ids() {
    let compiler = user_compiler(vec![AttributeMapping::single_nested(
        Attribute::typed("backedUpBy", "com.foo.Admin").unwrap(),
        Attribute::untyped("user").unwrap(),
        RepresenterId::parse("com.foo.representers.AdminRepresenter").unwrap(),
    )]);
    let err = compiler.compile(&user()).unwrap_err();
    match &err {
        Error::UnresolvedReference {
            representer,
            missing,
        } => {
            assert_eq!(representer, user().id());
            assert_eq!(missing.to_string(), "com.foo.representers.AdminRepresenter");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("UserRepresenter"));
    assert!(err.to_string().contains("AdminRepresenter"));
}

#[test]
fn test_unknown_reference_fails_even_when_skipped() {
    let descriptor = user().skip_serialize(true).skip_deserialize(true);
    let mut registry = DescriptorRegistry::new();
    registry.register(descriptor.clone()).unwrap();
    registry.add_attribute(
        descriptor.id(),
        AttributeMapping::collection(
            Attribute::untyped("friends").unwrap(),
            Attribute::untyped("friends").unwrap(),
            RepresenterId::parse("com.foo.FriendRepresenter").unwrap(),
            TypeRef::parse("com.foo.Friend").unwrap(),
        ),
    );
    let compiler = MappingCompiler::with_defaults(registry.freeze());
    assert!(matches!(
        compiler.compile(&descriptor),
        Err(Error::UnresolvedReference { .. })
    ));
    assert!(compiler.compile_all().is_err());
}

#[test]
fn test_nested_mapping_calls_other_unit() -> anyhow::Result<()> {
    let backup = RepresenterDescriptor::parse("com.foo.representers.BackupRepresenter", "com.foo.Backup")?;
    let mut registry = DescriptorRegistry::new();
    registry.register(backup.clone())?;
    registry.register(user())?;
    registry.add_attribute(user().id(), fname(false));
    registry.add_attribute(
        backup.id(),
        AttributeMapping::single_nested(
            Attribute::typed("backedUpBy", "com.foo.User")?,
            Attribute::untyped("user")?,
            user().representer,
        )
        .embedded(true),
    );

    let compiler = MappingCompiler::with_defaults(registry.freeze());
    let units = compiler.compile_all()?;
    assert_eq!(units.len(), 2);

    let backup_unit = &units[0];
    assert_eq!(
        backup_unit.dependencies(),
        vec![TypeRef::parse("gen.com.foo.representers.UserMapper")?]
    );
    let to_json = backup_unit.function(FunctionKind::ToJson).unwrap();
    assert!(to_json.body.iter().any(|stmt| matches!(
        stmt,
        Stmt::Put { target: Var::EmbeddedMap, key, value: Expr::CallMapper { function: FunctionKind::ToJson, .. } }
            if key == "user"
    )));
    assert!(units[1].dependencies().is_empty());
    Ok(())
}

#[test]
fn test_cyclic_descriptors_compile() -> anyhow::Result<()> {
    let mut registry = DescriptorRegistry::new();
    registry.register(user())?;
    registry.add_attribute(
        user().id(),
        AttributeMapping::collection(
            Attribute::untyped("friends")?,
            Attribute::untyped("friends")?,
            user().representer,
            TypeRef::parse("com.foo.User")?,
        ),
    );
    let compiler = MappingCompiler::with_defaults(registry.freeze());
    let unit = compiler.compile(&user())?;
    // Self references are not dependencies
    assert!(unit.dependencies().is_empty());
    Ok(())
}

#[test]
fn test_links_are_written_first() -> anyhow::Result<()> {
    let descriptor =
        user().with_links_provider(TypeRef::parse("com.foo.representers.UserLinksProvider")?);
    let mut registry = DescriptorRegistry::new();
    registry.register(descriptor.clone())?;
    registry.add_attribute(descriptor.id(), fname(false));
    let unit = MappingCompiler::with_defaults(registry.freeze()).compile(&descriptor)?;

    let to_json = unit.function(FunctionKind::ToJson).unwrap();
    assert!(matches!(
        &to_json.body[1],
        Stmt::PutAll { target: Var::Json, source: Expr::Links { constant, .. } } if constant == "LINKS_PROVIDER"
    ));
    assert!(matches!(&to_json.body[2], Stmt::Put { key, .. } if key == "first_name"));
    Ok(())
}

#[test]
fn test_custom_deserializer_replaces_read_path() -> anyhow::Result<()> {
    let descriptor =
        user().with_custom_deserializer(TypeRef::parse("com.foo.representers.UserDeserializer")?);
    let mut registry = DescriptorRegistry::new();
    registry.register(descriptor.clone())?;
    registry.add_attribute(descriptor.id(), fname(false));
    let unit = MappingCompiler::with_defaults(registry.freeze()).compile(&descriptor)?;

    let from_json = unit.function(FunctionKind::FromJson).unwrap();
    assert_eq!(from_json.body.len(), 2);
    assert!(matches!(
        &from_json.body[1],
        Stmt::Return(Expr::Apply { constant, .. }) if constant == "USER_DESERIALIZER"
    ));
    Ok(())
}

fn material_registry(dispatch: SubclassDispatch) -> anyhow::Result<(MappingCompiler, RepresenterDescriptor)> {
    let base = RepresenterDescriptor::parse("com.foo.MaterialRepresenter", "com.foo.Material")?
        .with_subclass_dispatch(dispatch);
    let mut registry = DescriptorRegistry::new();
    registry.register(base.clone())?;
    registry.register(RepresenterDescriptor::parse("com.foo.GitRepresenter", "com.foo.GitMaterial")?)?;
    registry.register(RepresenterDescriptor::parse("com.foo.SvnRepresenter", "com.foo.SvnMaterial")?)?;
    Ok((MappingCompiler::with_defaults(registry.freeze()), base))
}

#[test]
fn test_subclass_dispatch_shape() -> anyhow::Result<()> {
    let dispatch = SubclassDispatch::new("type")
        .nested_under("attributes")
        .variant("git", RepresenterId::parse("com.foo.GitRepresenter")?)
        .variant("svn", RepresenterId::parse("com.foo.SvnRepresenter")?);
    let (compiler, base) = material_registry(dispatch)?;
    let unit = compiler.compile(&base)?;

    let to_json = unit.function(FunctionKind::ToJson).unwrap();
    let instance_checks: Vec<&str> = to_json
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::If { condition: Expr::IsInstance { ty, .. }, .. } => Some(ty.simple_name()),
            _ => None,
        })
        .collect();
    assert_eq!(instance_checks, vec!["GitMaterial", "SvnMaterial"]);

    let from_json = unit.function(FunctionKind::FromJson).unwrap();
    let arms: Vec<&str> = from_json
        .body
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::Match { arms, .. } => Some(arms.iter().map(|a| a.literal.as_str()).collect()),
            _ => None,
        })
        .unwrap();
    assert_eq!(arms, vec!["git", "svn"]);
    assert_eq!(unit.dependencies().len(), 2);
    Ok(())
}

#[test]
fn test_duplicate_discriminator_fails() -> anyhow::Result<()> {
    let dispatch = SubclassDispatch::new("type")
        .variant("git", RepresenterId::parse("com.foo.GitRepresenter")?)
        .variant("git", RepresenterId::parse("com.foo.SvnRepresenter")?);
    let (compiler, base) = material_registry(dispatch)?;
    assert!(matches!(
        compiler.compile(&base),
        Err(Error::DuplicateDiscriminator { ref id, .. }) if id == "git"
    ));
    Ok(())
}

#[test]
fn test_compilation_is_deterministic() -> anyhow::Result<()> {
    let set = DescriptorSet::from_json(include_str!("fixtures/users.json"))?;
    let first = MappingCompiler::with_defaults(DescriptorRegistry::from_set(set.clone())?.freeze())
        .compile_all()?;
    let second = MappingCompiler::with_defaults(DescriptorRegistry::from_set(set)?.freeze())
        .compile_all()?;
    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
    Ok(())
}
