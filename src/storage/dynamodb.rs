//! DynamoDB implementation of OrderStore
//!
//! Orders live in a single table keyed by the string attribute `id`.
//! Updates are sent as one `UpdateItem` call guarded by
//! `attribute_exists(id)`, so a missing order is reported through
//! `ConditionalCheckFailedException` instead of being upserted.

use crate::core::expression::CompiledUpdate;
use crate::core::order::{Order, OrderId};
use crate::core::store::{OrderStore, StoreError};
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDBClient;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use std::collections::HashMap;
use std::fmt::Debug;

const BACKEND: &str = "DynamoDB";
const KEY_ATTRIBUTE: &str = "id";
const EXISTS_CONDITION: &str = "attribute_exists(id)";

/// DynamoDB order store
///
/// The client and table name are injected; nothing is read from the
/// environment here.
#[derive(Clone)]
pub struct DynamoDBOrderStore {
    client: DynamoDBClient,
    table_name: String,
}

impl DynamoDBOrderStore {
    pub fn new(client: DynamoDBClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn key(id: &OrderId) -> HashMap<String, AttributeValue> {
        HashMap::from([(KEY_ATTRIBUTE.to_string(), AttributeValue::S(id.to_string()))])
    }

    fn expression_values(
        update: &CompiledUpdate,
    ) -> Result<HashMap<String, AttributeValue>, StoreError> {
        update
            .values()
            .into_iter()
            .map(|(key, value)| {
                let attribute: AttributeValue = serde_dynamo::to_attribute_value(value)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                Ok((format!(":{}", key), attribute))
            })
            .collect()
    }
}

/// A failed `attribute_exists(id)` condition means the order is absent
fn classify_update_error<R: Debug>(e: SdkError<UpdateItemError, R>) -> StoreError {
    let not_found = e
        .as_service_error()
        .is_some_and(|service| service.is_conditional_check_failed_exception());
    if not_found {
        StoreError::NotFound
    } else {
        StoreError::backend(BACKEND, DisplayErrorContext(&e).to_string())
    }
}

#[async_trait]
impl OrderStore for DynamoDBOrderStore {
    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(order).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::backend(BACKEND, DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .send()
            .await
            .map_err(|e| StoreError::backend(BACKEND, DisplayErrorContext(&e).to_string()))?;

        match result.item {
            Some(item) => serde_dynamo::from_item(item)
                .map(Some)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    async fn update(&self, id: &OrderId, update: &CompiledUpdate) -> Result<Order, StoreError> {
        // `status` is a reserved word, so attribute names go through aliases
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .update_expression(update.aliased_expression())
            .set_expression_attribute_names(Some(update.attribute_names().into_iter().collect()))
            .set_expression_attribute_values(Some(Self::expression_values(update)?))
            .condition_expression(EXISTS_CONDITION)
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(classify_update_error)?;

        let attributes = result.attributes.ok_or_else(|| {
            StoreError::backend(BACKEND, "update returned no attributes")
        })?;

        serde_dynamo::from_item(attributes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
