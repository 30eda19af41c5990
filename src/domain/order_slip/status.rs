//! Order-slip status lifecycle

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where an order slip sits in the sales/logistics workflow.
///
/// Only the reservation engine moves a slip into `ForApprovalOfOM`. The
/// terminal states belong to the approval workflow and are used here purely
/// as exclusion filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSlipStatus {
    Created,
    HaulerAppointed,
    SupplierAppointed,
    ForApprovalOfOM,
    Closed,
    Expired,
    Disapproved,
}

impl OrderSlipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::HaulerAppointed => "HaulerAppointed",
            Self::SupplierAppointed => "SupplierAppointed",
            Self::ForApprovalOfOM => "ForApprovalOfOM",
            Self::Closed => "Closed",
            Self::Expired => "Expired",
            Self::Disapproved => "Disapproved",
        }
    }

    /// Closed, Expired and Disapproved slips never receive new appointments
    /// or reservations.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Expired | Self::Disapproved)
    }

    /// Status after a reservation line is booked against the slip.
    pub fn after_reservation(self) -> Option<Self> {
        if self.is_terminal() {
            None
        } else {
            Some(Self::ForApprovalOfOM)
        }
    }

    /// Status after a supplier is appointed. Slips already further along
    /// keep their status.
    pub fn after_supplier_appointed(self) -> Option<Self> {
        match self {
            Self::Created | Self::HaulerAppointed => Some(Self::SupplierAppointed),
            s if s.is_terminal() => None,
            s => Some(s),
        }
    }
}

impl fmt::Display for OrderSlipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSlipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Self::Created),
            "HaulerAppointed" => Ok(Self::HaulerAppointed),
            "SupplierAppointed" => Ok(Self::SupplierAppointed),
            "ForApprovalOfOM" => Ok(Self::ForApprovalOfOM),
            "Closed" => Ok(Self::Closed),
            "Expired" => Ok(Self::Expired),
            "Disapproved" => Ok(Self::Disapproved),
            other => Err(format!("unknown order slip status '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderSlipStatus; 7] = [
        OrderSlipStatus::Created,
        OrderSlipStatus::HaulerAppointed,
        OrderSlipStatus::SupplierAppointed,
        OrderSlipStatus::ForApprovalOfOM,
        OrderSlipStatus::Closed,
        OrderSlipStatus::Expired,
        OrderSlipStatus::Disapproved,
    ];

    #[test]
    fn only_closed_expired_disapproved_are_terminal() {
        let terminal: Vec<_> = ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(
            terminal,
            vec![
                &OrderSlipStatus::Closed,
                &OrderSlipStatus::Expired,
                &OrderSlipStatus::Disapproved
            ]
        );
    }

    #[test]
    fn reservation_moves_every_open_status_to_for_approval() {
        for s in ALL.iter().filter(|s| !s.is_terminal()) {
            assert_eq!(s.after_reservation(), Some(OrderSlipStatus::ForApprovalOfOM));
        }
        assert_eq!(OrderSlipStatus::Closed.after_reservation(), None);
    }

    #[test]
    fn supplier_appointment_does_not_rewind_later_statuses() {
        assert_eq!(
            OrderSlipStatus::HaulerAppointed.after_supplier_appointed(),
            Some(OrderSlipStatus::SupplierAppointed)
        );
        assert_eq!(
            OrderSlipStatus::ForApprovalOfOM.after_supplier_appointed(),
            Some(OrderSlipStatus::ForApprovalOfOM)
        );
        assert_eq!(OrderSlipStatus::Expired.after_supplier_appointed(), None);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!("Closed".parse::<OrderSlipStatus>(), Ok(OrderSlipStatus::Closed));
        assert!("closed".parse::<OrderSlipStatus>().is_err());
    }
}
