pub use sea_orm_migration::prelude::*;

mod m0000010_create_supplier;
mod m0000020_create_material;
mod m0000030_create_product;
mod m0000040_create_material_composition;
mod m0000050_create_product_composition;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m0000010_create_supplier::Migration),
            Box::new(m0000020_create_material::Migration),
            Box::new(m0000030_create_product::Migration),
            Box::new(m0000040_create_material_composition::Migration),
            Box::new(m0000050_create_product_composition::Migration),
        ]
    }
}

pub struct Now;

impl Iden for Now {
    fn unquoted(&self, s: &mut dyn Write) {
        write!(s, "now").unwrap()
    }
}

pub struct UuidV4;

impl Iden for UuidV4 {
    fn unquoted(&self, s: &mut dyn Write) {
        write!(s, "gen_random_uuid").unwrap()
    }
}
