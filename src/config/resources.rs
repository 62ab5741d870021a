//! Resource catalogue: which remote table backs each resource and which related rows its reads embed.

use crate::query::Embed;

#[derive(Clone, Copy, Debug)]
pub struct ResourceSpec {
    /// Name used in log lines and not-found messages.
    pub name: &'static str,
    pub table: &'static str,
    /// Gateway stamps `created_at` on insert.
    pub stamp_created_at: bool,
    pub embeds: &'static [Embed],
}

pub const CREATED_AT: &str = "created_at";

pub const ITEMS: ResourceSpec = ResourceSpec {
    name: "item",
    table: "items",
    stamp_created_at: true,
    embeds: &[],
};

pub const SUPPLIERS: ResourceSpec = ResourceSpec {
    name: "supplier",
    table: "suppliers",
    stamp_created_at: false,
    embeds: &[],
};

pub const CUSTOMERS: ResourceSpec = ResourceSpec {
    name: "customer",
    table: "customers",
    stamp_created_at: false,
    embeds: &[],
};

/// Orders carry the display names of their item, supplier and customer as nested objects.
pub const ORDERS: ResourceSpec = ResourceSpec {
    name: "order",
    table: "orders",
    stamp_created_at: true,
    embeds: &[
        Embed {
            alias: "items",
            table: "items",
            foreign_key: "item_id",
            columns: &["id", "name"],
            flatten: None,
        },
        Embed {
            alias: "supplier",
            table: "suppliers",
            foreign_key: "supplier_id",
            columns: &["id", "name"],
            flatten: None,
        },
        Embed {
            alias: "customers",
            table: "customers",
            foreign_key: "customer_id",
            columns: &["id", "name"],
            flatten: None,
        },
    ],
};

/// Inventory rows flatten item and supplier display fields (`item_name`, `supplier_name`, ...).
pub const INVENTORY: ResourceSpec = ResourceSpec {
    name: "inventory row",
    table: "inventory",
    stamp_created_at: true,
    embeds: &[
        Embed {
            alias: "item",
            table: "items",
            foreign_key: "item_id",
            columns: &["name", "sku", "category", "price"],
            flatten: Some("item"),
        },
        Embed {
            alias: "supplier",
            table: "suppliers",
            foreign_key: "supplier_id",
            columns: &["name"],
            flatten: Some("supplier"),
        },
    ],
};

/// Column summed by the revenue aggregate.
pub const ORDER_TOTAL_COLUMN: &str = "total_price";
