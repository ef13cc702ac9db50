//! Fixed records every initialized store converges to.
//!
//! These values are part of the tool's external contract: test suites and
//! storefront developers log in and redeem codes with them.

use rust_decimal::Decimal;

/// Quantity forced onto every variant's stock row.
pub const STOCK_QUANTITY: i32 = 1_000_000;

/// Slug of the channel vouchers are listed on when it exists.
pub const DEFAULT_CHANNEL_SLUG: &str = "default-channel";

/// Voucher `type` for discounts applied to the whole order.
pub const VOUCHER_TYPE_ENTIRE_ORDER: &str = "entire_order";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Admin,
    Regular,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Admin => write!(f, "admin"),
            AccountRole::Regular => write!(f, "regular"),
        }
    }
}

/// Canonical state of a test login.
///
/// `first_name`/`last_name` of `None` leave whatever the row already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestAccount {
    pub role: AccountRole,
    pub email: &'static str,
    pub password: &'static str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
}

pub const ADMIN_ACCOUNT: TestAccount = TestAccount {
    role: AccountRole::Admin,
    email: "admin@example.com",
    password: "admin",
    is_active: true,
    is_staff: true,
    is_superuser: true,
    first_name: None,
    last_name: None,
};

pub const REGULAR_ACCOUNT: TestAccount = TestAccount {
    role: AccountRole::Regular,
    email: "user@example.com",
    password: "senha123",
    is_active: true,
    is_staff: false,
    is_superuser: false,
    first_name: Some("Usuário"),
    last_name: Some("Teste"),
};

pub const TEST_ACCOUNTS: [TestAccount; 2] = [ADMIN_ACCOUNT, REGULAR_ACCOUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

impl DiscountKind {
    /// Value stored in `discount_voucher.discount_value_type`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Fixed => "fixed",
        }
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub kind: DiscountKind,
    pub discount_value: Decimal,
    pub min_spent_amount: Option<Decimal>,
    /// Explicit listing currency. `None` means the channel's own currency.
    pub currency: Option<&'static str>,
}

impl VoucherDefinition {
    /// Currency the channel listing is written with.
    #[must_use]
    pub fn listing_currency<'a>(&'a self, channel_currency: &'a str) -> &'a str {
        self.currency.unwrap_or(channel_currency)
    }

    /// One-line human description used in the run summary.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.kind, self.min_spent_amount) {
            (DiscountKind::Percentage, _) => {
                format!("{} ({}% off)", self.code, self.discount_value)
            }
            (DiscountKind::Fixed, Some(min)) => format!(
                "{} ({} {} off orders above {} {})",
                self.code,
                self.currency.unwrap_or(""),
                self.discount_value,
                self.currency.unwrap_or(""),
                min
            ),
            (DiscountKind::Fixed, None) => format!(
                "{} ({} {} off)",
                self.code,
                self.currency.unwrap_or(""),
                self.discount_value
            ),
        }
    }
}

/// The three promotional codes provisioned on the default channel.
#[must_use]
pub fn voucher_definitions() -> [VoucherDefinition; 3] {
    [
        VoucherDefinition {
            code: "DESC10",
            name: "Desconto de 10%",
            kind: DiscountKind::Percentage,
            discount_value: Decimal::from(10),
            min_spent_amount: None,
            currency: None,
        },
        VoucherDefinition {
            code: "PRIMEIRACOMPRA",
            name: "Primeira Compra - 15%",
            kind: DiscountKind::Percentage,
            discount_value: Decimal::from(15),
            min_spent_amount: None,
            currency: None,
        },
        VoucherDefinition {
            code: "BEMVINDO",
            name: "Bem-vindo - R$ 20 OFF",
            kind: DiscountKind::Fixed,
            discount_value: Decimal::from(20),
            min_spent_amount: Some(Decimal::from(50)),
            currency: Some("BRL"),
        },
    ]
}
