use super::*;
use crate::model::{graph::Edge, MaterialEdge, ResolvedProduct, SubProductEdge};
use nutrify_entity::serving_unit::ServingUnit;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use test_log::test;
use uuid::Uuid;

#[derive(Default)]
struct MemorySource {
    products: HashMap<Uuid, ResolvedProduct>,
}

impl MemorySource {
    fn add(&mut self, product: ResolvedProduct) -> Uuid {
        let id = product.id;
        self.products.insert(id, product);
        id
    }
}

impl CompositionSource for MemorySource {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<ResolvedProduct>, Error> {
        Ok(self.products.get(&id).cloned())
    }
}

fn product(name: &str, serving_size: Decimal) -> ResolvedProduct {
    ResolvedProduct {
        id: Uuid::new_v4(),
        name: name.to_string(),
        serving_size,
        serving_unit: ServingUnit::G,
        serving_per_package: 1,
        materials: vec![],
        sub_products: vec![],
    }
}

fn material(energy: Decimal, protein: Decimal, quantity: Decimal) -> MaterialEdge {
    MaterialEdge {
        material_id: Uuid::new_v4(),
        nutrition: crate::model::Nutrition {
            energy,
            protein,
            ..Default::default()
        },
        quantity,
    }
}

fn sub_product(child_id: Uuid, quantity: Decimal) -> SubProductEdge {
    SubProductEdge { child_id, quantity }
}

#[test(tokio::test)]
async fn untagged_product_yields_all_zero_panel() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let id = source.add(product("p1", dec!(10)));

    let panel = CompositionService::new().nutrition_panel(id, &source).await?;

    assert_eq!(panel.name, "p1");
    assert_eq!(panel.serving_size, dec!(10));
    assert_eq!(panel.serving_unit, ServingUnit::G);
    assert_eq!(panel.serving_per_package, 1);
    assert_eq!(panel.per_serving.energy, "0kcal");
    assert_eq!(panel.per_serving.protein, "0.0g");
    assert_eq!(panel.per_serving.cholesterol, "0mg");
    assert_eq!(panel.per_serving.sodium, "0mg");
    assert_eq!(panel.per_hundred.energy, "0kcal");
    assert_eq!(panel.per_hundred.dietary_fibre, "0.0g");

    Ok(())
}

#[test(tokio::test)]
async fn single_material_aggregates_linearly() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let mut p1 = product("p1", dec!(200));
    p1.materials.push(material(dec!(800), dec!(500), dec!(2)));
    let id = source.add(p1);

    let panel = CompositionService::new().nutrition_panel(id, &source).await?;

    assert_eq!(panel.per_serving.energy, "1600kcal");
    assert_eq!(panel.per_serving.protein, "1000.0g");
    // 1600 / 200 * 100
    assert_eq!(panel.per_hundred.energy, "800kcal");
    assert_eq!(panel.per_hundred.protein, "500.0g");

    Ok(())
}

#[test(tokio::test)]
async fn many_materials_sum_per_field() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let mut p1 = product("p1", dec!(200));
    p1.materials.push(material(dec!(800), dec!(500), dec!(2)));
    p1.materials.push(material(dec!(1000), dec!(600), dec!(3)));
    let id = source.add(p1);

    let panel = CompositionService::new().nutrition_panel(id, &source).await?;

    assert_eq!(panel.per_serving.energy, "4600kcal");
    assert_eq!(panel.per_serving.protein, "2800.0g");
    assert_eq!(panel.per_hundred.energy, "2300kcal");

    Ok(())
}

#[test(tokio::test)]
async fn sub_product_totals_multiply_by_edge_quantity() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let mut p1 = product("p1", dec!(200));
    p1.materials.push(material(dec!(800), dec!(500), dec!(2)));
    let p1 = source.add(p1);

    let mut p2 = product("p2", dec!(200));
    p2.sub_products.push(sub_product(p1, dec!(2)));
    let p2 = source.add(p2);

    let panel = CompositionService::new().nutrition_panel(p2, &source).await?;

    assert_eq!(panel.per_serving.energy, "3200kcal");
    assert_eq!(panel.per_serving.protein, "2000.0g");

    Ok(())
}

#[test(tokio::test)]
async fn aggregation_recurses_through_grandchildren() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let mut p1 = product("p1", dec!(200));
    p1.materials.push(material(dec!(800), dec!(500), dec!(2)));
    let p1 = source.add(p1);

    let mut p2 = product("p2", dec!(200));
    p2.sub_products.push(sub_product(p1, dec!(2)));
    let p2 = source.add(p2);

    let mut p3 = product("p3", dec!(200));
    p3.sub_products.push(sub_product(p2, dec!(2)));
    let p3 = source.add(p3);

    let panel = CompositionService::new().nutrition_panel(p3, &source).await?;

    assert_eq!(panel.per_serving.energy, "6400kcal");
    assert_eq!(panel.per_serving.protein, "4000.0g");

    Ok(())
}

#[test(tokio::test)]
async fn shared_subtrees_aggregate_once_per_parent() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let mut base = product("base", dec!(100));
    base.materials.push(material(dec!(100), dec!(10), dec!(1)));
    let base = source.add(base);

    let mut left = product("left", dec!(100));
    left.sub_products.push(sub_product(base, dec!(2)));
    let left = source.add(left);

    let mut right = product("right", dec!(100));
    right.sub_products.push(sub_product(base, dec!(3)));
    let right = source.add(right);

    let mut top = product("top", dec!(100));
    top.sub_products.push(sub_product(left, dec!(1)));
    top.sub_products.push(sub_product(right, dec!(1)));
    let top = source.add(top);

    let panel = CompositionService::new().nutrition_panel(top, &source).await?;

    // base contributes through both branches of the diamond
    assert_eq!(panel.per_serving.energy, "500kcal");
    assert_eq!(panel.per_serving.protein, "50.0g");

    Ok(())
}

#[test(tokio::test)]
async fn panel_for_unknown_product_is_not_found() {
    let source = MemorySource::default();

    let result = CompositionService::new()
        .nutrition_panel(Uuid::new_v4(), &source)
        .await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[test(tokio::test)]
async fn self_reference_is_rejected_without_traversal() -> Result<(), Error> {
    let mut source = MemorySource::default();
    let p1 = source.add(product("p1", dec!(10)));

    let cycles = CompositionService::new()
        .check_cycles(p1, &[p1], &source)
        .await?;

    assert_eq!(cycles, vec![Edge { from: p1, to: p1 }]);

    Ok(())
}

#[test(tokio::test)]
async fn chain_rejects_every_backwards_edge() -> Result<(), Error> {
    let mut source = MemorySource::default();

    // p4 -> p3 -> p2 -> p1
    let p1 = source.add(product("p1", dec!(10)));
    let mut p2 = product("p2", dec!(10));
    p2.sub_products.push(sub_product(p1, dec!(1)));
    let p2 = source.add(p2);
    let mut p3 = product("p3", dec!(10));
    p3.sub_products.push(sub_product(p2, dec!(1)));
    let p3 = source.add(p3);
    let mut p4 = product("p4", dec!(10));
    p4.sub_products.push(sub_product(p3, dec!(1)));
    let p4 = source.add(p4);

    let service = CompositionService::new();
    for target in [p1, p2, p3, p4] {
        let cycles = service.check_cycles(target, &[p4], &source).await?;
        assert!(!cycles.is_empty(), "adding p4 under {target} must cycle");
    }

    Ok(())
}

#[test(tokio::test)]
async fn acyclic_proposals_pass() -> Result<(), Error> {
    let mut source = MemorySource::default();

    let p1 = source.add(product("p1", dec!(10)));
    let mut p2 = product("p2", dec!(10));
    p2.sub_products.push(sub_product(p1, dec!(1)));
    let p2 = source.add(p2);
    let p5 = source.add(product("p5", dec!(10)));

    let service = CompositionService::new();

    // a fresh parent over the whole chain
    let cycles = service.check_cycles(p5, &[p2], &source).await?;
    assert_eq!(cycles, vec![]);

    // a diamond is sharing, not a cycle
    let mut p6 = product("p6", dec!(10));
    p6.sub_products.push(sub_product(p1, dec!(1)));
    let p6 = source.add(p6);
    let cycles = service.check_cycles(p5, &[p2, p6], &source).await?;
    assert_eq!(cycles, vec![]);

    Ok(())
}
