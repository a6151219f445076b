//! Form state for the add-child, edit-child and add-transaction sheets.

use chrono::{DateTime, Utc};
use log::debug;
use shared::{
    Avatar, Child, CreateChildRequest, ThemeColor, Transaction, TransactionType, UpdateChildRequest,
};

use super::commands::{ChildFormAction, TransactionFormAction};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Amount must be a finite number")]
    NonFiniteAmount,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
}

/// What a form action asks the parent to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    None,
    Save,
    Cancel,
}

/// Fields of a child profile being created or edited
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildForm {
    pub name: String,
    pub theme_color: ThemeColor,
    pub avatar: Avatar,
    pub avatar_data: Option<Vec<u8>>,
}

impl ChildForm {
    /// Blank form for a new child
    pub fn new() -> Self {
        Self::default()
    }

    /// Form seeded with an existing child's profile
    pub fn editing(child: &Child) -> Self {
        Self {
            name: child.name.clone(),
            theme_color: child.theme_color,
            avatar: child.avatar,
            avatar_data: child.avatar_data.clone(),
        }
    }

    pub fn reduce(&mut self, action: ChildFormAction) -> FormEvent {
        match action {
            ChildFormAction::SetName(name) => self.name = name,
            ChildFormAction::SetThemeColor(color) => self.theme_color = color,
            ChildFormAction::SelectAvatar(avatar) => {
                // A stock avatar replaces any custom image
                self.avatar = avatar;
                self.avatar_data = None;
            }
            ChildFormAction::SetAvatarData(data) => self.avatar_data = data,
            ChildFormAction::SaveTapped => return FormEvent::Save,
            ChildFormAction::CancelTapped => return FormEvent::Cancel,
        }
        FormEvent::None
    }

    pub fn into_create_request(self) -> CreateChildRequest {
        CreateChildRequest {
            name: self.name,
            theme_color: self.theme_color,
            avatar: self.avatar,
            avatar_data: self.avatar_data,
        }
    }

    /// Patch for the edited child. A blank name keeps the current one.
    pub fn into_update_request(self) -> UpdateChildRequest {
        let name = if self.name.trim().is_empty() {
            debug!("Blank name on edit, keeping the existing name");
            None
        } else {
            Some(self.name)
        };

        UpdateChildRequest {
            name,
            theme_color: Some(self.theme_color),
            avatar: Some(self.avatar),
            avatar_data: Some(self.avatar_data),
        }
    }
}

/// Draft of a transaction being recorded
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub transaction: Transaction,
}

impl TransactionForm {
    /// Zero-amount income dated `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            transaction: Transaction::new(0.0, "", now, TransactionType::Income),
        }
    }

    pub fn reduce(&mut self, action: TransactionFormAction) -> FormEvent {
        match action {
            TransactionFormAction::SetAmount(amount) => self.transaction.amount = amount,
            TransactionFormAction::SetDescription(description) => {
                self.transaction.description = description
            }
            TransactionFormAction::SetDate(date) => self.transaction.date = date,
            TransactionFormAction::SetType(transaction_type) => {
                self.transaction.transaction_type = transaction_type
            }
            TransactionFormAction::SaveTapped => return FormEvent::Save,
            TransactionFormAction::CancelTapped => return FormEvent::Cancel,
        }
        FormEvent::None
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let amount = self.transaction.amount;
        if !amount.is_finite() {
            return Err(FormError::NonFiniteAmount);
        }
        if amount <= 0.0 {
            return Err(FormError::NonPositiveAmount);
        }
        Ok(())
    }

    pub fn can_save(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_child_form_defaults() {
        let form = ChildForm::new();
        assert_eq!(form.name, "");
        assert_eq!(form.theme_color, ThemeColor::PastelBlue);
        assert_eq!(form.avatar, Avatar::Boy);
        assert_eq!(form.avatar_data, None);
    }

    #[test]
    fn test_select_avatar_clears_custom_image() {
        let mut form = ChildForm::new();
        form.reduce(ChildFormAction::SetAvatarData(Some(vec![9, 9])));
        assert_eq!(form.avatar_data, Some(vec![9, 9]));

        assert_eq!(form.reduce(ChildFormAction::SelectAvatar(Avatar::Girl)), FormEvent::None);
        assert_eq!(form.avatar, Avatar::Girl);
        assert_eq!(form.avatar_data, None);
    }

    #[test]
    fn test_child_form_events() {
        let mut form = ChildForm::new();
        assert_eq!(form.reduce(ChildFormAction::SetName("Lia".into())), FormEvent::None);
        assert_eq!(form.reduce(ChildFormAction::SaveTapped), FormEvent::Save);
        assert_eq!(form.reduce(ChildFormAction::CancelTapped), FormEvent::Cancel);
        assert_eq!(form.name, "Lia");
    }

    #[test]
    fn test_edit_form_blank_name_keeps_existing() {
        let child = Child::new("Omer", ThemeColor::PastelGreen, Avatar::Boy, None);
        let mut form = ChildForm::editing(&child);
        form.reduce(ChildFormAction::SetName("  ".into()));
        form.reduce(ChildFormAction::SetThemeColor(ThemeColor::PastelSky));

        let patch = form.into_update_request();
        assert_eq!(patch.name, None);
        assert_eq!(patch.theme_color, Some(ThemeColor::PastelSky));
        assert_eq!(patch.avatar_data, Some(None));
    }

    #[test]
    fn test_transaction_form_seed_and_validation() {
        let now = Utc::now();
        let mut form = TransactionForm::new(now);
        assert_eq!(form.transaction.amount, 0.0);
        assert_eq!(form.transaction.transaction_type, TransactionType::Income);
        assert_eq!(form.transaction.date, now);
        assert_eq!(form.validate(), Err(FormError::NonPositiveAmount));

        form.reduce(TransactionFormAction::SetAmount(f64::NAN));
        assert_eq!(form.validate(), Err(FormError::NonFiniteAmount));

        form.reduce(TransactionFormAction::SetAmount(-3.0));
        assert!(!form.can_save());

        form.reduce(TransactionFormAction::SetAmount(3.0));
        form.reduce(TransactionFormAction::SetType(TransactionType::Outcome));
        form.reduce(TransactionFormAction::SetDescription("Stickers".into()));
        assert!(form.can_save());

        let transaction = form.into_transaction();
        assert_eq!(transaction.amount, 3.0);
        assert_eq!(transaction.transaction_type, TransactionType::Outcome);
        assert_eq!(transaction.description, "Stickers");
    }
}
