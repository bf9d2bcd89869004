//! In-memory repository implementations.
//!
//! These back the same traits as the `PostgreSQL` repositories so the router
//! and services can be exercised in tests without a database. State lives
//! only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use vinayak_core::{Email, OrderId, OrderStatus, ProductId};

use super::{
    OrderRepository, OwnerAccountRepository, ProductRepository, RepositoryError,
    UserAccountRepository,
};
use crate::models::account::{OwnerAccount, UserAccount};
use crate::models::order::{NewOrder, Order, OrderSummary};
use crate::models::product::{NewProduct, Product};

// =============================================================================
// Products
// =============================================================================

/// In-memory product repository.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().rev().cloned().collect())
    }

    async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        let product = Product {
            id: ProductId::generate(),
            name: new.name,
            description: new.description,
            price: new.price,
            image: new.image,
            category: new.category,
            is_featured: new.is_featured,
            created_at: Utc::now(),
        };

        self.products.write().await.push(product.clone());
        Ok(product)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// In-memory order repository.
#[derive(Debug, Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn create(&self, new: NewOrder) -> Result<Order, RepositoryError> {
        let order = Order {
            id: OrderId::generate(),
            customer_name: new.customer_name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            city: new.city,
            state: new.state,
            pincode: new.pincode,
            payment_method: new.payment_method,
            items: new.items,
            total: new.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn find_by_customer(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        if email.is_none() && phone.is_none() {
            return Ok(Vec::new());
        }

        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .rev()
            .filter(|order| {
                let email_ok = email.is_none_or(|e| order.email.as_deref() == Some(e));
                let phone_ok = phone.is_none_or(|p| order.phone.as_deref() == Some(p));
                email_ok && phone_ok
            })
            .map(|order| OrderSummary {
                id: order.id,
                total: order.total,
                items: order.items.clone(),
                created_at: order.created_at,
            })
            .collect())
    }

    async fn find_recent(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let limit = usize::try_from(limit).unwrap_or_default();
        let orders = self.orders.read().await;
        Ok(orders.iter().rev().take(limit).cloned().collect())
    }

    async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if !order.status.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "cannot move order from {} to {next}",
                order.status
            )));
        }

        order.status = next;
        Ok(order.clone())
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// In-memory customer account repository.
#[derive(Debug, Default)]
pub struct MemoryUserAccountRepository {
    accounts: RwLock<Vec<(UserAccount, String)>>,
}

#[async_trait]
impl UserAccountRepository for MemoryUserAccountRepository {
    async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        password_hash: &str,
    ) -> Result<UserAccount, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|(account, _)| account.email == *email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let account = UserAccount {
            id: vinayak_core::UserId::generate(),
            name: name.to_owned(),
            email: email.clone(),
            phone: phone.to_owned(),
            created_at: Utc::now(),
        };

        accounts.push((account.clone(), password_hash.to_owned()));
        Ok(account)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(UserAccount, String)>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|(account, _)| account.email == *email)
            .cloned())
    }
}

/// In-memory owner account repository.
#[derive(Debug, Default)]
pub struct MemoryOwnerAccountRepository {
    accounts: RwLock<Vec<(OwnerAccount, String)>>,
}

#[async_trait]
impl OwnerAccountRepository for MemoryOwnerAccountRepository {
    async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: &str,
        business_name: &str,
        password_hash: &str,
    ) -> Result<OwnerAccount, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|(account, _)| account.email == *email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let account = OwnerAccount {
            id: vinayak_core::OwnerId::generate(),
            name: name.to_owned(),
            email: email.clone(),
            phone: phone.to_owned(),
            business_name: business_name.to_owned(),
            created_at: Utc::now(),
        };

        accounts.push((account.clone(), password_hash.to_owned()));
        Ok(account)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(OwnerAccount, String)>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .iter()
            .find(|(account, _)| account.email == *email)
            .cloned())
    }
}
