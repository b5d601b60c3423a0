//! Text menu over a [`Store`].
//!
//! Input mistakes (unknown choices, non-numbers, out-of-range product numbers)
//! are reported and reprompted here; they never reach the store.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use colored::Colorize;
use tracing::debug;

use stockroom_store::{OrderLine, Store, StoreEvent};

/// A store whose notices are collected so the menu can print them.
pub type Shop = Store<Vec<StoreEvent>>;

pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R, W> Menu<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self, store: &mut Shop) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n{}", "--- Store Menu ---".bold())?;
            writeln!(self.output, "1. List all products in store")?;
            writeln!(self.output, "2. Show total amount in store")?;
            writeln!(self.output, "3. Make an order")?;
            writeln!(self.output, "4. Quit")?;

            let Some(choice) = self.prompt("Please choose a number: ")? else {
                return self.quit();
            };
            debug!(%choice, "menu choice");

            let flow = match choice.as_str() {
                "1" => self.list_products(store)?,
                "2" => self.show_total(store)?,
                "3" => self.make_order(store)?,
                "4" => ControlFlow::Break(()),
                _ => {
                    self.error("Invalid choice. Please enter a number from 1 to 4.")?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                return self.quit();
            }
        }
    }

    fn list_products(&mut self, store: &Shop) -> io::Result<ControlFlow<()>> {
        writeln!(self.output, "\n{}", "--- All Products ---".bold())?;
        let products = store.active_products();
        if products.is_empty() {
            writeln!(self.output, "No active products in store.")?;
        }
        for (number, product) in products.iter().enumerate() {
            writeln!(self.output, "{}. {}", number + 1, product.show())?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn show_total(&mut self, store: &Shop) -> io::Result<ControlFlow<()>> {
        writeln!(
            self.output,
            "\nTotal items in store: {}",
            store.total_quantity()
        )?;
        Ok(ControlFlow::Continue(()))
    }

    fn make_order(&mut self, store: &mut Shop) -> io::Result<ControlFlow<()>> {
        writeln!(self.output, "\n{}", "--- Make an Order ---".bold())?;

        // Numbers refer to this snapshot of the active products.
        let choices: Vec<_> = store
            .active_products()
            .iter()
            .map(|p| (p.id_typed(), p.show()))
            .collect();
        if choices.is_empty() {
            writeln!(self.output, "Store is empty, cannot place an order.")?;
            return Ok(ControlFlow::Continue(()));
        }
        for (number, (_, shown)) in choices.iter().enumerate() {
            writeln!(self.output, "{}. {}", number + 1, shown)?;
        }

        let mut shopping_list = Vec::new();
        loop {
            let Some(entry) = self.prompt("Which product # do you want? (or 'done' to finish): ")?
            else {
                return Ok(ControlFlow::Break(()));
            };
            if entry.eq_ignore_ascii_case("done") {
                break;
            }

            let Ok(number) = entry.parse::<i64>() else {
                self.invalid_number()?;
                continue;
            };
            let Some((product_id, _)) = number
                .checked_sub(1)
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| choices.get(i))
            else {
                self.error("Invalid product number.")?;
                continue;
            };

            let Some(entry) = self.prompt("What quantity do you want?: ")? else {
                return Ok(ControlFlow::Break(()));
            };
            let Ok(quantity) = entry.parse::<i64>() else {
                self.invalid_number()?;
                continue;
            };

            shopping_list.push(OrderLine::new(*product_id, quantity));
            writeln!(self.output, "Product added to order.")?;
        }

        if !shopping_list.is_empty() {
            let total = store.order(&shopping_list);
            self.print_notices(store)?;
            writeln!(
                self.output,
                "\n{}",
                format!("Order complete! Total cost: ${total:.2}").as_str().green()
            )?;
        }
        Ok(ControlFlow::Continue(()))
    }

    fn print_notices(&mut self, store: &mut Shop) -> io::Result<()> {
        for notice in store.sink_mut().drain(..) {
            match notice {
                StoreEvent::LineItemFailed(_) => {
                    writeln!(self.output, "{}", notice.to_string().as_str().red())?
                }
                _ => writeln!(self.output, "{notice}")?,
            }
        }
        Ok(())
    }

    /// Show `text` and read one line. `None` means input has ended.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn invalid_number(&mut self) -> io::Result<()> {
        self.error("Invalid input. Please enter numbers for product and quantity.")
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message.red())
    }

    fn quit(&mut self) -> io::Result<()> {
        writeln!(self.output, "Bye!")?;
        self.output.flush()
    }
}
