//! Interactive menu driving the catalog.
//!
//! Reads one answer per line. Every successful add, delete and rename is
//! announced through the notifier exactly once.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::adapters::{ChangeNotice, Notifier};
use crate::library::{BookKind, Catalog, Curator, Librarian, Removal};

/// Menu-driven session over one catalog
pub struct Shell<'a, R, W> {
    catalog: &'a mut Catalog,
    notifier: &'a mut dyn Notifier,
    librarian: Librarian,
    input: R,
    output: W,
}

/// First non-blank character of an answer
fn choice_of(answer: &str) -> Option<char> {
    answer.trim().chars().next()
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, notifier: &'a mut dyn Notifier, input: R, output: W) -> Self {
        Self {
            catalog,
            notifier,
            librarian: Librarian::new(),
            input,
            output,
        }
    }

    /// Run the main menu until the user quits or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n---Main Menu---")?;
            writeln!(self.output, "1: View All Books")?;
            writeln!(self.output, "2: View Physical Books")?;
            writeln!(self.output, "3: View Online Books")?;
            writeln!(self.output, "4: Total Number of Books")?;
            writeln!(self.output, "5: Search for book by title")?;
            writeln!(self.output, "6: Search for book by author")?;
            writeln!(self.output, "7: Admin Menu")?;
            writeln!(self.output, "8: Quit")?;

            let Some(answer) = self.prompt("Enter the number of your choice: ")? else {
                writeln!(self.output, "Exiting Program")?;
                break;
            };
            writeln!(self.output)?;

            match choice_of(&answer) {
                Some('1') => self.show_all()?,
                Some('2') => self.show_kind(BookKind::Physical)?,
                Some('3') => self.show_kind(BookKind::Online)?,
                Some('4') => {
                    writeln!(self.output, "Total number of books: {}", self.catalog.count())?
                }
                Some('5') => self.search_by_title()?,
                Some('6') => self.search_by_author()?,
                Some('7') => self.admin_menu().await?,
                Some('8') | Some('q') => {
                    writeln!(self.output, "Exiting Program")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    async fn admin_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n---Admin Menu---")?;
            writeln!(self.output, "1: Add New Book")?;
            writeln!(self.output, "2: Delete Book")?;
            writeln!(self.output, "3: Modify Book Title")?;
            writeln!(self.output, "4: Modify Book Author")?;
            writeln!(self.output, "5: Return to Main Menu")?;

            let Some(answer) = self.prompt("Enter the number of your choice: ")? else {
                return Ok(());
            };

            match choice_of(&answer) {
                Some('1') => self.add_book().await?,
                Some('2') => self.delete_book().await?,
                Some('3') => self.rename_title().await?,
                Some('4') => self.rename_author().await?,
                Some('5') | Some('q') => {
                    writeln!(self.output, "\nExiting Admin Menu...")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "\nInvalid choice. Please try again.")?,
            }
        }
    }

    fn show_all(&mut self) -> Result<()> {
        for book in self.catalog.list_all() {
            writeln!(self.output, "{}", book)?;
        }
        Ok(())
    }

    fn show_kind(&mut self, kind: BookKind) -> Result<()> {
        for book in self.catalog.list_by_kind(kind) {
            writeln!(self.output, "{}", book)?;
        }
        Ok(())
    }

    fn search_by_title(&mut self) -> Result<()> {
        let Some(title) = self.prompt("\nEnter the title of the book: ")? else {
            return Ok(());
        };

        match self.catalog.find_first_by_title(&title) {
            Some(book) => writeln!(self.output, "\n{}", book)?,
            None => writeln!(self.output, "\nNo books with that title were found...")?,
        }
        Ok(())
    }

    fn search_by_author(&mut self) -> Result<()> {
        let Some(author) = self.prompt("\nEnter the author of the book: ")? else {
            return Ok(());
        };

        match self.catalog.find_first_by_author(&author) {
            Some(book) => writeln!(self.output, "\n{}", book)?,
            None => writeln!(self.output, "\nNo books with that author were found...")?,
        }
        Ok(())
    }

    async fn add_book(&mut self) -> Result<()> {
        let Some(answer) = self.prompt("\nEnter book type, p for Physical or o for Online: ")? else {
            return Ok(());
        };
        let kind = match choice_of(&answer).map(|c| c.to_ascii_lowercase()) {
            Some('p') => BookKind::Physical,
            Some('o') => BookKind::Online,
            _ => {
                writeln!(self.output, "\nInvalid Input...")?;
                return Ok(());
            }
        };

        let Some(title) = self.prompt("\nEnter book title: ")? else {
            return Ok(());
        };
        let Some(author) = self.prompt("\nEnter book author: ")? else {
            return Ok(());
        };

        let record = match kind {
            BookKind::Physical => {
                let Some(raw) = self.prompt("\nEnter book shelf number: ")? else {
                    return Ok(());
                };
                match raw.trim().parse::<u32>() {
                    Ok(shelf_number) => self.catalog.physical(title.as_str(), author.as_str(), shelf_number),
                    Err(_) => {
                        writeln!(self.output, "\nInvalid shelf number: {}", raw.trim())?;
                        return Ok(());
                    }
                }
            }
            BookKind::Online => {
                let Some(url) = self.prompt("\nEnter book url: ")? else {
                    return Ok(());
                };
                self.catalog.online(title.as_str(), author.as_str(), url.trim())
            }
        };

        self.catalog.add(record);
        self.announce(ChangeNotice::Added { kind, title, author }).await;

        if let Some(newest) = self.catalog.most_recently_added() {
            writeln!(self.output, "{}", newest)?;
        }
        Ok(())
    }

    async fn delete_book(&mut self) -> Result<()> {
        let Some(title) = self.prompt("\nEnter book title: ")? else {
            return Ok(());
        };

        let (id, title, author) = match self.catalog.find_first_by_title(&title) {
            Some(book) => {
                writeln!(self.output, "{}", book)?;
                (book.id(), book.title().to_string(), book.author().to_string())
            }
            None => {
                writeln!(self.output, "\nNo books with that title were found...")?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nBook Found...")?;
        let Some(answer) =
            self.prompt("\nPlease type confirm to delete book, otherwise any other input to cancel: ")?
        else {
            return Ok(());
        };

        if !matches!(answer.trim(), "confirm" | "Confirm") {
            writeln!(self.output, "\nBook deletion canceled...")?;
            return Ok(());
        }

        match self.catalog.remove_by_identity(id) {
            Removal::Removed => {
                writeln!(self.output, "\nBook deleted...")?;
                self.announce(ChangeNotice::Deleted { title, author }).await;
            }
            Removal::NotFound => writeln!(self.output, "\nBook not in library...")?,
        }
        Ok(())
    }

    async fn rename_title(&mut self) -> Result<()> {
        let Some(title) = self.prompt("\nEnter book title: ")? else {
            return Ok(());
        };

        let id = match self.catalog.find_first_by_title(&title) {
            Some(book) => {
                writeln!(self.output, "{}", book)?;
                book.id()
            }
            None => {
                writeln!(self.output, "\nBook with title {} not found", title)?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nBook Found...")?;
        let Some(new_title) = self.prompt("\nEnter new title: ")? else {
            return Ok(());
        };

        let Some(record) = self.catalog.get_mut(id) else {
            return Ok(());
        };
        let old_title = record.title().to_string();
        self.librarian.rename_title(record, &new_title);

        writeln!(self.output, "\nBook updated to title: {}", new_title)?;
        self.announce(ChangeNotice::TitleChanged {
            from: old_title,
            to: new_title,
        })
        .await;
        Ok(())
    }

    async fn rename_author(&mut self) -> Result<()> {
        let Some(author) = self.prompt("\nEnter book author: ")? else {
            return Ok(());
        };

        let id = match self.catalog.find_first_by_author(&author) {
            Some(book) => {
                writeln!(self.output, "{}", book)?;
                book.id()
            }
            None => {
                writeln!(self.output, "\nBook with author {} not found", author)?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nBook Found...")?;
        let Some(new_author) = self.prompt("\nEnter new author: ")? else {
            return Ok(());
        };

        let Some(record) = self.catalog.get_mut(id) else {
            return Ok(());
        };
        let old_author = record.author().to_string();
        self.librarian.rename_author(record, &new_author);

        writeln!(self.output, "\nBook updated to author: {}", new_author)?;
        self.announce(ChangeNotice::AuthorChanged {
            from: old_author,
            to: new_author,
        })
        .await;
        Ok(())
    }

    async fn announce(&mut self, notice: ChangeNotice) {
        let text = notice.to_string();
        tracing::debug!(notifier = self.notifier.name(), "Announcing change");
        self.notifier.notify(&text).await;
    }

    /// Print a prompt and read one line; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_of() {
        assert_eq!(choice_of("  7\n"), Some('7'));
        assert_eq!(choice_of("quit"), Some('q'));
        assert_eq!(choice_of("   "), None);
    }
}
