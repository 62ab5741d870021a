//! Create payloads per resource and the marker types tying each resource to its table.
//!
//! Optional fields are `Option`s skipped on serialization, so absent fields never reach the
//! store as `null`. Prices stay as JSON numbers so the stored value is exactly what was sent.
//! Field names are the column names; any other key fails deserialization.

use crate::config::{ResourceSpec, StockPolicy, CUSTOMERS, INVENTORY, ITEMS, ORDERS, SUPPLIERS};
use crate::error::AppError;
use crate::service::validation as check;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Number;

pub trait CreatePayload: DeserializeOwned + Serialize + Send + 'static {
    fn validate(&self) -> Result<(), AppError>;

    /// Fill gateway-derived fields after validation.
    fn prepare(&mut self, _stock: &StockPolicy) {}
}

pub trait Resource: Send + Sync + 'static {
    const SPEC: ResourceSpec;
    type Payload: CreatePayload;
}

fn check_opt<T>(value: &Option<T>, f: impl FnOnce(&T) -> Result<(), AppError>) -> Result<(), AppError> {
    match value {
        Some(v) => f(v),
        None => Ok(()),
    }
}

fn non_negative_number(field: &str, n: &Number) -> Result<(), AppError> {
    check::non_negative(field, n.as_f64().unwrap_or(f64::NAN))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stocklevel: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

impl CreatePayload for NewItem {
    fn validate(&self) -> Result<(), AppError> {
        check::required_text("name", &self.name)?;
        check_opt(&self.price, |p| non_negative_number("price", p))?;
        check_opt(&self.stocklevel, |s| check::at_least("stocklevel", *s, 0))?;
        check_opt(&self.supplier_id, |id| check::positive_id("supplier_id", *id))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSupplier {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Tax (GST) registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstno: Option<String>,
}

impl CreatePayload for NewSupplier {
    fn validate(&self) -> Result<(), AppError> {
        check::required_text("name", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
}

impl CreatePayload for NewCustomer {
    fn validate(&self) -> Result<(), AppError> {
        check::required_text("name", &self.name)?;
        check_opt(&self.address, |a| check::min_length("address", a, 3))?;
        check_opt(&self.phone_no, |p| check::phone("phone_no", p))?;
        check_opt(&self.email, |e| check::email("email", e))?;
        check_opt(&self.dob, |d| check::iso_date("dob", d))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    pub item_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<String>,
    /// Free text, e.g. `pending`, `delivered`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreatePayload for NewOrder {
    fn validate(&self) -> Result<(), AppError> {
        check::positive_id("item_id", self.item_id)?;
        check_opt(&self.supplier_id, |id| check::positive_id("supplier_id", *id))?;
        check_opt(&self.customer_id, |id| check::positive_id("customer_id", *id))?;
        check::at_least("quantity", self.quantity, 1)?;
        check_opt(&self.order_date, |d| check::iso_date("order_date", d))?;
        check_opt(&self.expected_date, |d| check::iso_date("expected_date", d))?;
        check_opt(&self.total_price, |p| non_negative_number("total_price", p))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: i64, policy: &StockPolicy) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity < policy.low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// A supply row: stock of one item received from one supplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSupply {
    pub item_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<StockStatus>,
}

impl CreatePayload for NewSupply {
    fn validate(&self) -> Result<(), AppError> {
        check::positive_id("item_id", self.item_id)?;
        check_opt(&self.supplier_id, |id| check::positive_id("supplier_id", *id))?;
        check::at_least("quantity", self.quantity, 0)
    }

    fn prepare(&mut self, stock: &StockPolicy) {
        if self.stock_status.is_none() {
            self.stock_status = Some(StockStatus::for_quantity(self.quantity, stock));
        }
    }
}

pub struct Items;
pub struct Suppliers;
pub struct Customers;
pub struct Orders;
pub struct Inventory;

impl Resource for Items {
    const SPEC: ResourceSpec = ITEMS;
    type Payload = NewItem;
}

impl Resource for Suppliers {
    const SPEC: ResourceSpec = SUPPLIERS;
    type Payload = NewSupplier;
}

impl Resource for Customers {
    const SPEC: ResourceSpec = CUSTOMERS;
    type Payload = NewCustomer;
}

impl Resource for Orders {
    const SPEC: ResourceSpec = ORDERS;
    type Payload = NewOrder;
}

impl Resource for Inventory {
    const SPEC: ResourceSpec = INVENTORY;
    type Payload = NewSupply;
}
