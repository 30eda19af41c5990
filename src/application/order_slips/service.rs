//! Upstream appointment workflow
//!
//! Registers order slips and appoints suppliers to them, which is what
//! gives the ledger a reservable balance in the first place.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::application::context::RequestContext;
use crate::application::unit_of_work::finish;
use crate::domain::{
    AppointedSupplier, AuditCategory, AuditEntry, BookingStore, BookingUnitOfWork, DomainError,
    DomainResult, NewAppointment, NewOrderSlip, OrderSlip,
};

#[derive(Debug, Clone)]
pub struct RegisterOrderSlip {
    pub order_slip_no: String,
    pub customer_id: i32,
    pub pick_up_point_id: i32,
    pub depot: String,
    pub delivered_price: Decimal,
    pub freight: Decimal,
}

#[derive(Debug, Clone)]
pub struct AppointSupplier {
    pub supplier_id: i32,
    pub purchase_order_no: Option<String>,
    pub quantity: Decimal,
}

pub struct OrderSlipService {
    store: Arc<dyn BookingStore>,
}

impl OrderSlipService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn register_order_slip(
        &self,
        ctx: &RequestContext,
        cmd: RegisterOrderSlip,
    ) -> DomainResult<OrderSlip> {
        let mut uow = self.store.begin().await?;
        let result = apply_register(uow.as_mut(), ctx, cmd).await;
        let slip = finish(uow, result, ctx, "register_order_slip").await?;

        info!(order_slip_no = %slip.order_slip_no, company = %slip.company, "Order slip registered");
        Ok(slip)
    }

    /// Allocate `quantity` of an order slip to a supplier.
    ///
    /// Finalized slips and slips in a terminal status take no new
    /// appointments.
    pub async fn appoint_supplier(
        &self,
        ctx: &RequestContext,
        order_slip_id: i32,
        cmd: AppointSupplier,
    ) -> DomainResult<AppointedSupplier> {
        let mut uow = self.store.begin().await?;
        let result = apply_appoint(uow.as_mut(), ctx, order_slip_id, cmd).await;
        let appointment = finish(uow, result, ctx, "appoint_supplier").await?;

        info!(
            order_slip_id,
            appointed_id = appointment.id,
            supplier_id = appointment.supplier_id,
            quantity = %appointment.appointed_quantity,
            "Supplier appointed"
        );
        Ok(appointment)
    }
}

async fn apply_register(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    cmd: RegisterOrderSlip,
) -> DomainResult<OrderSlip> {
    if cmd.order_slip_no.trim().is_empty() {
        return Err(DomainError::Validation("Order slip number is required".into()));
    }
    if cmd.delivered_price < Decimal::ZERO || cmd.freight < Decimal::ZERO {
        return Err(DomainError::Validation(
            "Delivered price and freight cannot be negative".into(),
        ));
    }

    let slip = uow
        .insert_order_slip(NewOrderSlip {
            order_slip_no: cmd.order_slip_no,
            company: ctx.company.clone(),
            customer_id: cmd.customer_id,
            pick_up_point_id: cmd.pick_up_point_id,
            depot: cmd.depot,
            delivered_price: cmd.delivered_price,
            freight: cmd.freight,
            created_by: ctx.user_name.clone(),
        })
        .await?;

    uow.append_audit(AuditEntry::new(
        &ctx.user_name,
        &ctx.company,
        AuditCategory::Create,
        format!("Created order slip #{}", slip.order_slip_no),
    ))
    .await?;

    Ok(slip)
}

async fn apply_appoint(
    uow: &mut dyn BookingUnitOfWork,
    ctx: &RequestContext,
    order_slip_id: i32,
    cmd: AppointSupplier,
) -> DomainResult<AppointedSupplier> {
    if cmd.quantity <= Decimal::ZERO {
        return Err(DomainError::Validation(
            "Appointed quantity must be greater than zero".into(),
        ));
    }

    let mut slip = uow
        .find_order_slip(order_slip_id)
        .await?
        .filter(|slip| ctx.owns(&slip.company))
        .ok_or_else(|| DomainError::not_found("OrderSlip", "id", order_slip_id))?;

    if slip.finalized {
        return Err(DomainError::Validation(format!(
            "Order slip {} is fully reserved and cannot receive appointments",
            slip.order_slip_no
        )));
    }
    slip.mark_supplier_appointed()?;
    uow.save_order_slip(&slip).await?;

    let appointment = uow
        .insert_appointment(NewAppointment {
            order_slip_id: slip.id,
            supplier_id: cmd.supplier_id,
            purchase_order_no: cmd.purchase_order_no,
            quantity: cmd.quantity,
        })
        .await?;

    uow.append_audit(AuditEntry::new(
        &ctx.user_name,
        &ctx.company,
        AuditCategory::Update,
        format!(
            "Appointed supplier {} to order slip #{} for {}",
            appointment.supplier_id, slip.order_slip_no, appointment.appointed_quantity
        ),
    ))
    .await?;

    Ok(appointment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderSlipStatus;
    use crate::infrastructure::InMemoryBookingStore;

    fn ctx() -> RequestContext {
        RequestContext::new("jdoe", "Filpride")
    }

    fn register(no: &str) -> RegisterOrderSlip {
        RegisterOrderSlip {
            order_slip_no: no.into(),
            customer_id: 1,
            pick_up_point_id: 5,
            depot: "Batangas".into(),
            delivered_price: Decimal::from(60),
            freight: Decimal::from(2),
        }
    }

    fn appoint(quantity: i64) -> AppointSupplier {
        AppointSupplier {
            supplier_id: 7,
            purchase_order_no: None,
            quantity: Decimal::from(quantity),
        }
    }

    #[tokio::test]
    async fn appointment_moves_slip_to_supplier_appointed() {
        let store = InMemoryBookingStore::new();
        let service = OrderSlipService::new(Arc::new(store.clone()));

        let slip = service.register_order_slip(&ctx(), register("OS-1")).await.unwrap();
        assert_eq!(slip.status, OrderSlipStatus::Created);
        assert_eq!(slip.created_by, "jdoe");

        let a = service.appoint_supplier(&ctx(), slip.id, appoint(250)).await.unwrap();
        assert_eq!(a.appointed_quantity, Decimal::from(250));
        assert_eq!(a.remaining_unreserved, Decimal::from(250));

        let stored = store.order_slip(slip.id).await.unwrap();
        assert_eq!(stored.status, OrderSlipStatus::SupplierAppointed);
    }

    #[tokio::test]
    async fn invalid_requests_are_rejected() {
        let store = InMemoryBookingStore::new();
        let service = OrderSlipService::new(Arc::new(store.clone()));

        assert!(matches!(
            service.register_order_slip(&ctx(), register("  ")).await,
            Err(DomainError::Validation(_))
        ));

        let slip = service.register_order_slip(&ctx(), register("OS-1")).await.unwrap();
        assert!(matches!(
            service.register_order_slip(&ctx(), register("OS-1")).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(matches!(
            service.appoint_supplier(&ctx(), slip.id, appoint(0)).await,
            Err(DomainError::Validation(_))
        ));

        let other = RequestContext::new("ana", "Mobility");
        assert!(matches!(
            service.appoint_supplier(&other, slip.id, appoint(10)).await,
            Err(DomainError::NotFound { .. })
        ));

        store
            .set_order_slip_status(slip.id, OrderSlipStatus::Disapproved)
            .await;
        assert!(matches!(
            service.appoint_supplier(&ctx(), slip.id, appoint(10)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn finalized_slip_takes_no_new_appointment() {
        let store = InMemoryBookingStore::new();
        let service = OrderSlipService::new(Arc::new(store.clone()));
        let slip = service.register_order_slip(&ctx(), register("OS-1")).await.unwrap();
        service.appoint_supplier(&ctx(), slip.id, appoint(100)).await.unwrap();

        let mut uow = store.begin().await.unwrap();
        let mut finalized = uow.find_order_slip(slip.id).await.unwrap().unwrap();
        finalized.finalized = true;
        uow.save_order_slip(&finalized).await.unwrap();
        uow.commit().await.unwrap();

        let err = service
            .appoint_supplier(&ctx(), slip.id, appoint(50))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stored = store.order_slip(slip.id).await.unwrap();
        assert!(stored.finalized);
        let rows = store.supplier_appointments("Filpride", 7).await.unwrap();
        assert_eq!(rows.len(), 1);
    }
}
