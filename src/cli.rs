use std::io::{self, BufRead, Write};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::store::StoreManager;

// ── Numeric input ────────────────────────────────────────────────────────────

/// Rejected price or quantity input. Reported to the user and re-prompted;
/// never fatal and never added to an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidNumberError {
    #[error("\"{0}\" is not a valid number")]
    Malformed(String),
    #[error("price and quantity must be positive")]
    NotPositive,
}

/// Parses a price as a positive decimal. Decimal strings only, no floats.
pub fn parse_price(input: &str) -> Result<BigDecimal, InvalidNumberError> {
    let input = input.trim();
    let value = BigDecimal::from_str(input)
        .map_err(|_| InvalidNumberError::Malformed(input.to_string()))?;
    if value <= BigDecimal::from(0) {
        return Err(InvalidNumberError::NotPositive);
    }
    Ok(value)
}

/// Parses a quantity as a positive integer.
pub fn parse_quantity(input: &str) -> Result<u32, InvalidNumberError> {
    let input = input.trim();
    let value: u32 = input
        .parse()
        .map_err(|_| InvalidNumberError::Malformed(input.to_string()))?;
    if value == 0 {
        return Err(InvalidNumberError::NotPositive);
    }
    Ok(value)
}

// ── Console ──────────────────────────────────────────────────────────────────

/// Interactive console over a [`StoreManager`], generic over its input and
/// output streams so whole sessions can be driven from scripted text.
///
/// Every dialog follows the same cancellation rule: an empty answer (or end
/// of input) abandons the current interaction without leaving partial state.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs the menu loop until the user quits or input ends.
    pub fn run(&mut self, manager: &mut StoreManager) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let choice = match self.prompt("> ")? {
                Some(line) => line,
                None => return Ok(()),
            };
            match choice.as_str() {
                "1" => self.search_clients(manager)?,
                "2" => self.view_clients(manager)?,
                "3" => self.add_client(manager, None)?,
                "4" => self.add_order(manager)?,
                "5" => self.view_all_orders(manager)?,
                "q" | "Q" => {
                    writeln!(self.output, "Bye.")?;
                    return Ok(());
                }
                "" => {}
                other => writeln!(self.output, "Unknown option \"{}\".", other)?,
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Store manager ===")?;
        writeln!(self.output, "1) Search clients")?;
        writeln!(self.output, "2) View clients")?;
        writeln!(self.output, "3) Add client")?;
        writeln!(self.output, "4) Add order")?;
        writeln!(self.output, "5) View all orders")?;
        writeln!(self.output, "q) Quit")?;
        Ok(())
    }

    /// Writes `label`, reads one line and trims it. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    // ── Flows ────────────────────────────────────────────────────────────────

    fn search_clients(&mut self, manager: &mut StoreManager) -> io::Result<()> {
        let query = match self.prompt("Client name to search: ")? {
            Some(q) if !q.is_empty() => q,
            _ => {
                writeln!(self.output, "Enter a name to search for.")?;
                return Ok(());
            }
        };

        let found = manager.find_clients(&query);
        if found.is_empty() {
            writeln!(self.output, "No client matching \"{}\".", query)?;
            if self.confirm("Add a new client with that name? (y/n): ")? {
                self.add_client(manager, Some(query))?;
            }
        } else {
            writeln!(self.output, "Clients found:")?;
            let lines: Vec<String> = found.iter().map(|c| c.to_string()).collect();
            for line in lines {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(())
    }

    fn add_client(
        &mut self,
        manager: &mut StoreManager,
        prefill_name: Option<String>,
    ) -> io::Result<()> {
        let name = match prefill_name {
            Some(name) => name,
            None => match self.prompt("Name: ")? {
                Some(n) if !n.is_empty() => n,
                _ => return self.cancelled(),
            },
        };
        let phone = match self.prompt("Phone: ")? {
            Some(p) if !p.is_empty() => p,
            _ => return self.cancelled(),
        };
        let email = match self.prompt("Email: ")? {
            Some(e) if !e.is_empty() => e,
            _ => return self.cancelled(),
        };

        match manager.add_client(name.clone(), phone, email) {
            Ok(_) => {
                writeln!(self.output, "Client \"{}\" added.", name)?;
                if self.confirm("Add an order for this client now? (y/n): ")? {
                    self.enter_order(manager, &name)?;
                }
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn add_order(&mut self, manager: &mut StoreManager) -> io::Result<()> {
        let name = match self.prompt("Client name: ")? {
            Some(n) if !n.is_empty() => n,
            _ => return self.cancelled(),
        };
        if manager.get_client_by_name(&name).is_none() {
            writeln!(self.output, "No client named \"{}\".", name)?;
            return Ok(());
        }
        self.enter_order(manager, &name)
    }

    /// The product-entry loop. An empty product name ends it; bad numeric
    /// input is reported and the loop restarts without dropping items already
    /// entered. An order left without any items is rolled back.
    fn enter_order(&mut self, manager: &mut StoreManager, client_name: &str) -> io::Result<()> {
        let id = match manager.add_order(client_name) {
            Ok(id) => id,
            Err(e) => return writeln!(self.output, "Error: {}", e),
        };

        loop {
            let product = match self.prompt("Product name (empty to finish): ")? {
                Some(p) if !p.is_empty() => p,
                _ => break,
            };
            let price_text = self.prompt("Price: ")?.unwrap_or_default();
            let price = match parse_price(&price_text) {
                Ok(p) => p,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            };
            let quantity_text = self.prompt("Quantity: ")?.unwrap_or_default();
            let quantity = match parse_quantity(&quantity_text) {
                Ok(q) => q,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            };
            let Some(order) = manager.order_mut(id) else {
                break;
            };
            order.add_product(product, price, quantity);
        }

        let is_empty = manager.order(id).map_or(true, |o| o.is_empty());
        if is_empty {
            if manager.discard_order(id).is_ok() {
                writeln!(self.output, "Order without items was cancelled.")?;
            }
        } else {
            let total = manager.order(id).map(|o| o.total()).unwrap_or_default();
            writeln!(self.output, "Order {} totalling {} added!", id, total)?;
        }
        Ok(())
    }

    fn view_clients(&mut self, manager: &mut StoreManager) -> io::Result<()> {
        if manager.clients().is_empty() {
            return writeln!(self.output, "No clients yet.");
        }

        let rows: Vec<String> = manager
            .clients()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c))
            .collect();
        for row in rows {
            writeln!(self.output, "{}", row)?;
        }

        let selection = match self.prompt("Client number to view orders (empty to skip): ")? {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(()),
        };
        let Ok(index) = selection.parse::<usize>() else {
            return writeln!(self.output, "\"{}\" is not a valid number", selection);
        };
        match index.checked_sub(1).and_then(|i| manager.clients().get(i)) {
            Some(client) => {
                let summary = manager.orders_summary(client);
                writeln!(self.output, "Orders for {}:", client.name)?;
                writeln!(self.output, "{}", summary)?;
            }
            None => writeln!(self.output, "No client with number {}.", index)?,
        }
        Ok(())
    }

    fn view_all_orders(&mut self, manager: &mut StoreManager) -> io::Result<()> {
        if manager.orders().is_empty() {
            return writeln!(self.output, "No orders yet.");
        }
        writeln!(self.output, "Total orders: {}", manager.orders().len())?;
        writeln!(self.output, "Total revenue: {}", manager.total_revenue())?;
        writeln!(self.output, "{}", manager.list_orders())?;
        Ok(())
    }

    // ── Small helpers ────────────────────────────────────────────────────────

    fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let answer = self.prompt(label)?.unwrap_or_default();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.output, "Cancelled.")
    }
}
