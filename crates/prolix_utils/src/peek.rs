pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    fn eat<P>(&mut self, pat: P) -> bool
    where
        Self::Item: PartialEq<P>,
    {
        match self.peek() {
            Some(item) if item == pat => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Consume items while they satisfy `pred`, returning how many were consumed.
    fn eat_while(&mut self, mut pred: impl FnMut(&Self::Item) -> bool) -> usize {
        let mut count = 0;

        while matches!(self.peek(), Some(item) if pred(&item)) {
            self.next();
            count += 1;
        }

        count
    }

    fn at_end(&self) -> bool {
        self.peek().is_none()
    }
}

impl<P: Peek> Peek for &mut P {
    fn peek(&self) -> Option<Self::Item> {
        (**self).peek()
    }
}

impl<T> Peek for std::slice::Iter<'_, T> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}

impl Peek for std::str::Chars<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}

#[cfg(test)]
mod tests {
    use super::Peek;

    #[test]
    fn eat_and_eat_while() {
        let mut chars = "aab c".chars();

        assert!(chars.eat('a'));
        assert!(!chars.eat('b'));
        assert_eq!(chars.eat_while(|&ch| ch.is_alphabetic()), 2);
        assert_eq!(chars.peek(), Some(' '));
        assert!(!chars.at_end());

        chars.next();
        chars.next();
        assert!(chars.at_end());
    }
}
